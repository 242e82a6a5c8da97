//! Tracing subscriber setup

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::ConfigError;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to stderr so that batch
/// results written to stdout stay machine-readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = build_filter(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| ConfigError::InvalidValue {
        name: "logging",
        message: e.to_string(),
    })
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => config.env_filter(),
    }
}
