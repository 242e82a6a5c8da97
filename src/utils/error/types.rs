//! Error types for the batch processor

use serde_json::Value;
use thiserror::Error;

/// Result type alias for batch runs
pub type Result<T> = std::result::Result<T, BatchError>;

/// Failure of a single item's pipeline
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// A required parameter resolved to an empty or blank value
    #[error("{display_name} is required")]
    MissingParameter {
        name: &'static str,
        display_name: &'static str,
    },

    /// Upload source selected but no binary property name given
    #[error("Binary Property Name is required when using Upload Image")]
    MissingBinaryProperty,

    /// Base64 source selected but no image string given
    #[error("Base64 Image is required when using Base64 String option")]
    MissingBase64Image,

    /// A parameter holds a value outside its allowed set
    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The named attachment is absent or could not be read
    #[error("Binary data '{name}' is not available: {message}")]
    AttachmentUnavailable { name: String, message: String },

    /// The DocuProx API answered with a non-2xx status or the transport failed
    #[error("{message}")]
    ApiCallFailed {
        message: String,
        details: Option<Value>,
    },
}

/// Error that aborts a whole batch run
#[derive(Error, Debug)]
pub enum BatchError {
    /// The API call of an item failed
    #[error("DocuProx API Error: {message} [item {item_index}]")]
    Api {
        item_index: usize,
        message: String,
        details: Option<Value>,
    },

    /// Any other item failure
    #[error("{source} [item {item_index}]")]
    Item {
        item_index: usize,
        source: ProcessingError,
    },
}

/// Configuration and manifest loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A setting holds an unusable value
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },

    /// A required setting is absent
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
