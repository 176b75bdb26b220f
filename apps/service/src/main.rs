mod cli;
mod commands;
mod config;
mod database;
mod monitoring;
mod pool;
mod render;
mod validation;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_with_level(match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    });

    let config = Config::from_config(cli.config.as_deref())?;
    config.validate()?;

    commands::run(cli.command, config).await
}
