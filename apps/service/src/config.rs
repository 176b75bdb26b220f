use std::time::Duration;
use std::{env, fmt, fs, io, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tnfs_probe::{ProbeConfig, TNFS_PORT};

use crate::validation;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] io::Error),

    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("No config path available (set XDG_CONFIG_HOME or HOME)")]
    ConfigPathUnavailable,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub monitor: MonitorConfig,
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: path::PathBuf,
    pub pool_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between check cycles
    pub interval_seconds: u64,
    /// Servers probed at the same time
    pub concurrency: usize,
}

/// Probe settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub port: u16,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub udp_timeout_ms: u64,
    pub max_response_len: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "tnfs-monitor.db".into(), pool_size: 4 }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { interval_seconds: 3600, concurrency: 8 }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        let defaults = ProbeConfig::default();
        Self {
            port: TNFS_PORT,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            read_timeout_ms: defaults.read_timeout.as_millis() as u64,
            udp_timeout_ms: defaults.udp_timeout.as_millis() as u64,
            max_response_len: defaults.max_response_len,
        }
    }
}

impl From<&ProbeSettings> for ProbeConfig {
    fn from(settings: &ProbeSettings) -> Self {
        Self {
            port: settings.port,
            connect_timeout: Duration::from_millis(settings.connect_timeout_ms),
            read_timeout: Duration::from_millis(settings.read_timeout_ms),
            udp_timeout: Duration::from_millis(settings.udp_timeout_ms),
            max_response_len: settings.max_response_len,
        }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/tnfs-monitor/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("tnfs-monitor/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Database")?;
        write_1(f, "Path", &self.database.path.display())?;
        write_1(f, "Pool Size", &self.database.pool_size)?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Interval (s)", &self.monitor.interval_seconds)?;
        write_1(f, "Concurrency", &self.monitor.concurrency)?;
        write_title_1(f, "Probe")?;
        write_1(f, "Port", &self.probe.port)?;
        write_1(f, "Connect Timeout (ms)", &self.probe.connect_timeout_ms)?;
        write_1(f, "Read Timeout (ms)", &self.probe.read_timeout_ms)?;
        write_1(f, "UDP Timeout (ms)", &self.probe.udp_timeout_ms)?;
        write_1(f, "Max Response (bytes)", &self.probe.max_response_len)?;

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/tnfs-monitor/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path).map_err(Error::ReadFailed)?;
            Ok(toml::from_str(raw_string.as_str())?)
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::WriteFailed)?;
        }

        fs::write(path, config_str).map_err(Error::WriteFailed)
    }

    /// Reject settings that would make probing unbounded or meaningless
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |e: anyhow::Error| Error::Invalid(e.to_string());

        validation::validate_check_interval(self.monitor.interval_seconds).map_err(invalid)?;
        validation::validate_timeout_ms(self.probe.connect_timeout_ms).map_err(invalid)?;
        validation::validate_timeout_ms(self.probe.read_timeout_ms).map_err(invalid)?;
        validation::validate_timeout_ms(self.probe.udp_timeout_ms).map_err(invalid)?;

        if self.probe.port == 0 {
            return Err(Error::Invalid("Port 0 is not valid".into()));
        }
        if self.probe.max_response_len < tnfs_probe::protocol::types::RESPONSE_HEADER_LEN {
            return Err(Error::Invalid(format!(
                "max_response_len must hold a response header ({} bytes)",
                tnfs_probe::protocol::types::RESPONSE_HEADER_LEN
            )));
        }
        if self.monitor.concurrency == 0 {
            return Err(Error::Invalid("concurrency must be at least 1".into()));
        }
        if self.database.pool_size == 0 {
            return Err(Error::Invalid("pool_size must be at least 1".into()));
        }

        Ok(())
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig::from(&self.probe)
    }
}
