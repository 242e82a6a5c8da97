//! Parameter resolution for a single item

use super::context::BatchContext;
use super::types::{ImageSource, ProcessingParameters, param_names};
use crate::utils::error::ProcessingError;
use serde_json::Value;

/// Default attachment name for upload-sourced images
pub const DEFAULT_BINARY_PROPERTY_NAME: &str = "data";

/// Reads typed parameter values for an item from the host's parameter store
pub struct ParameterResolver;

impl ParameterResolver {
    /// Resolve the parameters of item `item_index`
    ///
    /// Only the field that matches the selected image source is read.
    pub fn resolve<C>(ctx: &C, item_index: usize) -> Result<ProcessingParameters, ProcessingError>
    where
        C: BatchContext + ?Sized,
    {
        let template_id =
            Self::string_parameter(ctx, param_names::TEMPLATE_ID, item_index)?.unwrap_or_default();
        if template_id.trim().is_empty() {
            return Err(ProcessingError::missing_parameter(
                param_names::TEMPLATE_ID,
                "Template ID",
            ));
        }

        let image_source = match Self::string_parameter(ctx, param_names::IMAGE_SOURCE, item_index)?
        {
            Some(raw) => raw.parse::<ImageSource>()?,
            None => ImageSource::default(),
        };

        let mut params = ProcessingParameters {
            template_id,
            image_source,
            binary_property_name: None,
            base64_image: None,
        };

        match image_source {
            ImageSource::Upload => {
                params.binary_property_name = Some(
                    Self::string_parameter(ctx, param_names::BINARY_PROPERTY_NAME, item_index)?
                        .unwrap_or_else(|| DEFAULT_BINARY_PROPERTY_NAME.to_string()),
                );
            }
            ImageSource::Base64 => {
                params.base64_image = Some(
                    Self::string_parameter(ctx, param_names::BASE64_IMAGE, item_index)?
                        .unwrap_or_default(),
                );
            }
        }

        Ok(params)
    }

    /// Read a parameter as a string; scalars are stringified, `null` counts as absent
    pub fn string_parameter<C>(
        ctx: &C,
        name: &str,
        item_index: usize,
    ) -> Result<Option<String>, ProcessingError>
    where
        C: BatchContext + ?Sized,
    {
        match ctx.get_parameter(name, item_index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(ProcessingError::invalid_parameter(
                name,
                format!("expected a string, got {}", json_type_name(&other)),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
