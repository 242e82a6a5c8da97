//! Configuration management for the batch processor
//!
//! Settings come from an optional YAML file, then environment variables override individual
//! values.

pub mod models;

pub use models::*;

use crate::utils::error::ConfigError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable names
pub mod env_vars {
    pub const API_KEY: &str = "DOCUPROX_API_KEY";
    pub const API_BASE: &str = "DOCUPROX_API_BASE";
    pub const TIMEOUT_MS: &str = "DOCUPROX_TIMEOUT_MS";
    pub const CONTINUE_ON_FAILURE: &str = "DOCUPROX_CONTINUE_ON_FAILURE";
    pub const LOG_LEVEL: &str = "DOCUPROX_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "DOCUPROX_LOG_FORMAT";
}

/// Main configuration struct
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub batch: BatchSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            })?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Override values that are set in the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Override values from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(env_vars::API_KEY) {
            self.api.api_key = Some(api_key);
        }
        if let Some(endpoint) = lookup(env_vars::API_BASE) {
            self.api.endpoint = endpoint;
        }
        if let Some(timeout) = lookup(env_vars::TIMEOUT_MS) {
            self.api.timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::InvalidValue {
                        name: env_vars::TIMEOUT_MS,
                        message: format!("{}", e),
                    })?;
        }
        if let Some(flag) = lookup(env_vars::CONTINUE_ON_FAILURE) {
            self.batch.continue_on_failure = parse_flag(&flag).ok_or_else(|| {
                ConfigError::InvalidValue {
                    name: env_vars::CONTINUE_ON_FAILURE,
                    message: format!("expected true or false, got '{}'", flag),
                }
            })?;
        }
        if let Some(level) = lookup(env_vars::LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(env_vars::LOG_FORMAT) {
            self.logging.format = format
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    name: env_vars::LOG_FORMAT,
                    message,
                })?;
        }
        Ok(self)
    }

    /// Check everything a batch run needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating configuration");

        match self.api.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing("api.api_key")),
        }

        if self.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "api.timeout_ms",
                message: "must be greater than 0".to_string(),
            });
        }

        let endpoint = url::Url::parse(&self.api.endpoint).map_err(|e| ConfigError::InvalidValue {
            name: "api.endpoint",
            message: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "api.endpoint",
                message: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        self.logging.env_filter()?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
