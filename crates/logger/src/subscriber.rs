use std::env::var;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format, chosen through `RUST_LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match var("RUST_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
pub fn init_with_level(level: LevelFilter) {
    if let Err(error) = try_init(level, LogFormat::from_env()) {
        eprintln!("Failed to install tracing subscriber: {error}");
    }
}

/// Install a debug-level subscriber, ignoring an already installed one
pub fn try_init_test() {
    let _ = try_init(LevelFilter::DEBUG, LogFormat::Compact);
}

fn try_init(
    level: LevelFilter,
    format: LogFormat,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry().with(log_layer).try_init()
}
