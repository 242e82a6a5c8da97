//! Request envelope construction

use super::types::{ImagePayload, RequestEnvelope};

/// Assembles the body submitted to the DocuProx API
pub struct RequestBuilder;

impl RequestBuilder {
    /// Build the envelope for one item
    pub fn build(template_id: &str, payload: ImagePayload) -> RequestEnvelope {
        RequestEnvelope {
            template_id: template_id.to_string(),
            actual_image: payload.into_inner(),
        }
    }
}
