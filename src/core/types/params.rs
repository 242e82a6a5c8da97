//! Resolved per-item processing parameters

use crate::utils::error::ProcessingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parameter names as exposed to the host
pub mod param_names {
    pub const RESOURCE: &str = "resource";
    pub const OPERATION: &str = "operation";
    pub const TEMPLATE_ID: &str = "templateId";
    pub const IMAGE_SOURCE: &str = "imageSource";
    pub const BINARY_PROPERTY_NAME: &str = "binaryPropertyName";
    pub const BASE64_IMAGE: &str = "base64Image";
}

/// Where the image for an item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Binary attachment on the item
    #[default]
    Upload,
    /// Base64 string parameter, optionally with a data URI prefix
    Base64,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Upload => "upload",
            ImageSource::Base64 => "base64",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSource {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "upload" => Ok(ImageSource::Upload),
            "base64" => Ok(ImageSource::Base64),
            other => Err(ProcessingError::invalid_parameter(
                param_names::IMAGE_SOURCE,
                format!("expected 'upload' or 'base64', got '{}'", other),
            )),
        }
    }
}

/// Parameters resolved for one item
///
/// Only the field matching `image_source` is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingParameters {
    pub template_id: String,
    pub image_source: ImageSource,
    pub binary_property_name: Option<String>,
    pub base64_image: Option<String>,
}

impl ProcessingParameters {
    /// Parameters for an upload-sourced item
    pub fn upload(template_id: impl Into<String>, binary_property_name: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            image_source: ImageSource::Upload,
            binary_property_name: Some(binary_property_name.into()),
            base64_image: None,
        }
    }

    /// Parameters for an inline base64 item
    pub fn base64(template_id: impl Into<String>, base64_image: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            image_source: ImageSource::Base64,
            binary_property_name: None,
            base64_image: Some(base64_image.into()),
        }
    }
}
