//! Request envelope sent to the DocuProx API

use serde::{Deserialize, Serialize};

/// Canonical base64 image payload for one item
///
/// Never empty; built fresh for every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    /// Wrap an encoded payload, rejecting empty strings
    pub fn new(encoded: impl Into<String>) -> Option<Self> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            None
        } else {
            Some(Self(encoded))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Body of `POST /v1/process`
///
/// Field names are part of the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub template_id: String,
    pub actual_image: String,
}
