use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Reachability monitor for TNFS servers
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/tnfs-monitor/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check all servers on the configured interval until interrupted
    Serve,
    /// Check all servers once now
    Check,
    /// Probe a server and add it to the list
    Add { host: String },
    /// Remove a server by id
    Remove { id: i64 },
    /// Set display order, e.g. `reorder 3,1,2`
    Reorder {
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<i64>,
    },
    /// Show the server list with current status
    List {
        #[arg(long)]
        json: bool,
    },
    /// Probe a server without storing anything
    Probe { host: String },
    /// Print the effective configuration
    Config,
}
