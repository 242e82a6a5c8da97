//! Configuration models

use crate::core::dispatcher::{DEFAULT_TIMEOUT, DOCUPROX_PROCESS_URL};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// DocuProx API access
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key sent as `x-auth`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Process endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Batch run behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Record item failures instead of aborting the run
    #[serde(default)]
    pub continue_on_failure: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive such as `info` or `info,docuprox_batch=debug`, overridden by
    /// `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter built from the configured directive
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(self.level.trim()).map_err(|e| ConfigError::InvalidValue {
            name: "logging.level",
            message: e.to_string(),
        })
    }
}

fn default_endpoint() -> String {
    DOCUPROX_PROCESS_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_log_level() -> String {
    "info".to_string()
}
