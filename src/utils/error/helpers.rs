//! Helper functions for creating and inspecting errors

use super::types::{BatchError, ProcessingError};
use serde_json::Value;

impl ProcessingError {
    pub fn missing_parameter(name: &'static str, display_name: &'static str) -> Self {
        Self::MissingParameter { name, display_name }
    }

    pub fn invalid_parameter<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn attachment_unavailable<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::AttachmentUnavailable {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn api_call_failed<S: Into<String>>(message: S, details: Option<Value>) -> Self {
        Self::ApiCallFailed {
            message: message.into(),
            details,
        }
    }

    /// Structured detail payload attached to the error, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::ApiCallFailed { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Stable machine-readable category
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "missing_parameter",
            Self::MissingBinaryProperty => "missing_binary_property",
            Self::MissingBase64Image => "missing_base64_image",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::AttachmentUnavailable { .. } => "attachment_unavailable",
            Self::ApiCallFailed { .. } => "api_call_failed",
        }
    }
}

impl BatchError {
    /// Annotate an item failure with its index
    ///
    /// API failures are re-worded so the message names DocuProx as the source.
    pub fn at_item(item_index: usize, error: ProcessingError) -> Self {
        match error {
            ProcessingError::ApiCallFailed { message, details } => Self::Api {
                item_index,
                message,
                details,
            },
            source => Self::Item { item_index, source },
        }
    }

    /// Index of the item that aborted the batch
    pub fn item_index(&self) -> usize {
        match self {
            Self::Api { item_index, .. } | Self::Item { item_index, .. } => *item_index,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Api { details, .. } => details.as_ref(),
            Self::Item { source, .. } => source.details(),
        }
    }
}
