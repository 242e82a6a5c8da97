//! Image payload acquisition strategies

use super::context::BatchContext;
use super::types::{ImagePayload, ImageSource, ProcessingParameters};
use crate::utils::error::ProcessingError;
use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;

/// Marker that ends a data URI prefix
const BASE64_MARKER: &str = "base64,";

/// How the image of one item is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSourceStrategy<'a> {
    /// Read a named binary attachment of the item and encode it
    BinaryUpload { property_name: &'a str },
    /// Use an inline base64 string, dropping any data URI prefix
    InlineBase64 { value: &'a str },
}

impl<'a> ImageSourceStrategy<'a> {
    /// Pick the strategy selected by the item's parameters
    pub fn from_parameters(params: &'a ProcessingParameters) -> Self {
        match params.image_source {
            ImageSource::Upload => ImageSourceStrategy::BinaryUpload {
                property_name: params.binary_property_name.as_deref().unwrap_or_default(),
            },
            ImageSource::Base64 => ImageSourceStrategy::InlineBase64 {
                value: params.base64_image.as_deref().unwrap_or_default(),
            },
        }
    }

    /// Produce the canonical base64 payload for item `item_index`
    pub async fn resolve<C>(
        &self,
        ctx: &C,
        item_index: usize,
    ) -> Result<ImagePayload, ProcessingError>
    where
        C: BatchContext + ?Sized,
    {
        match *self {
            ImageSourceStrategy::BinaryUpload { property_name } => {
                if property_name.trim().is_empty() {
                    return Err(ProcessingError::MissingBinaryProperty);
                }

                let bytes = ctx.get_attachment_bytes(item_index, property_name).await?;
                debug!(
                    item_index,
                    property_name,
                    size = bytes.len(),
                    "Encoding binary attachment"
                );

                ImagePayload::new(STANDARD.encode(&bytes)).ok_or_else(|| {
                    ProcessingError::attachment_unavailable(property_name, "attachment is empty")
                })
            }
            ImageSourceStrategy::InlineBase64 { value } => {
                if value.trim().is_empty() {
                    return Err(ProcessingError::MissingBase64Image);
                }

                ImagePayload::new(strip_data_uri_prefix(value))
                    .ok_or(ProcessingError::MissingBase64Image)
            }
        }
    }
}

/// Keep only the text after the first `base64,`, or the whole input when absent
///
/// This is a plain substring split, not a data URI parser.
pub fn strip_data_uri_prefix(value: &str) -> &str {
    match value.split_once(BASE64_MARKER) {
        Some((_, payload)) => payload,
        None => value,
    }
}
