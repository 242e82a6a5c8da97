//! Host-facing node schema: metadata, properties and display conditions

use crate::core::context::BatchContext;
use crate::core::resolver::ParameterResolver;
use crate::core::types::param_names;
use crate::utils::error::ProcessingError;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Property input kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Options,
}

/// One selectable value of an `options` property
#[derive(Debug, Clone, Serialize)]
pub struct PropertyOption {
    pub name: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    pub description: &'static str,
}

/// Show a property only when every listed parameter holds one of the listed values
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<&'static str, Vec<&'static str>>,
}

impl DisplayOptions {
    fn show(rules: &[(&'static str, &[&'static str])]) -> Self {
        Self {
            show: rules
                .iter()
                .map(|(name, values)| (*name, values.to_vec()))
                .collect(),
        }
    }

    fn matches(&self, values: &Map<String, Value>) -> bool {
        self.show.iter().all(|(name, allowed)| {
            values
                .get(*name)
                .and_then(Value::as_str)
                .or_else(|| node_description().default_for(name).and_then(Value::as_str))
                .is_some_and(|v| allowed.contains(&v))
        })
    }
}

/// A configurable node parameter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub default: Value,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

/// Credential requirement of the node
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRequirement {
    pub name: &'static str,
    pub required: bool,
}

/// Full node description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: &'static str,
    pub name: &'static str,
    pub group: Vec<&'static str>,
    pub version: u32,
    pub description: &'static str,
    pub credentials: Vec<CredentialRequirement>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Declared default of a property
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.property(name).map(|p| &p.default)
    }

    /// Whether `property` is shown for the given parameter values
    ///
    /// Values missing from `values` fall back to their defaults.
    pub fn is_visible(&self, property: &NodeProperty, values: &Map<String, Value>) -> bool {
        property
            .display_options
            .as_ref()
            .is_none_or(|options| options.matches(values))
    }

    pub fn visible_properties(&self, values: &Map<String, Value>) -> Vec<&NodeProperty> {
        self.properties
            .iter()
            .filter(|p| self.is_visible(p, values))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The DocuProx node description
pub fn node_description() -> &'static NodeDescription {
    static DESCRIPTION: OnceLock<NodeDescription> = OnceLock::new();
    DESCRIPTION.get_or_init(build_description)
}

const DOCUMENT_PROCESS: &[(&str, &[&str])] = &[
    (param_names::RESOURCE, &["document"]),
    (param_names::OPERATION, &["process"]),
];

fn build_description() -> NodeDescription {
    NodeDescription {
        display_name: "DocuProx",
        name: "docuProx",
        group: vec!["transform"],
        version: 1,
        description: "Process documents using DocuProx API",
        credentials: vec![CredentialRequirement {
            name: "docuProxApi",
            required: true,
        }],
        properties: vec![
            NodeProperty {
                display_name: "Resource",
                name: param_names::RESOURCE,
                kind: PropertyType::Options,
                default: json!("document"),
                required: true,
                placeholder: None,
                description: None,
                options: vec![PropertyOption {
                    name: "Document",
                    value: "document",
                    action: None,
                    description: "Work with documents using DocuProx",
                }],
                display_options: None,
            },
            NodeProperty {
                display_name: "Operation",
                name: param_names::OPERATION,
                kind: PropertyType::Options,
                default: json!("process"),
                required: true,
                placeholder: None,
                description: None,
                options: vec![PropertyOption {
                    name: "Process",
                    value: "process",
                    action: Some("Process a document"),
                    description: "Process a document with a template",
                }],
                display_options: Some(DisplayOptions::show(&[(
                    param_names::RESOURCE,
                    &["document"],
                )])),
            },
            NodeProperty {
                display_name: "Template ID",
                name: param_names::TEMPLATE_ID,
                kind: PropertyType::String,
                default: json!(""),
                required: true,
                placeholder: Some("Enter Template ID"),
                description: Some("The ID of the template to use for document processing"),
                options: Vec::new(),
                display_options: Some(DisplayOptions::show(DOCUMENT_PROCESS)),
            },
            NodeProperty {
                display_name: "Image Source",
                name: param_names::IMAGE_SOURCE,
                kind: PropertyType::Options,
                default: json!("upload"),
                required: true,
                placeholder: None,
                description: Some("Select how you want to provide the image"),
                options: vec![
                    PropertyOption {
                        name: "Upload Image File",
                        value: "upload",
                        action: None,
                        description: "Upload an image file from binary data",
                    },
                    PropertyOption {
                        name: "Base64 String",
                        value: "base64",
                        action: None,
                        description: "Provide image as Base64 encoded string",
                    },
                ],
                display_options: Some(DisplayOptions::show(DOCUMENT_PROCESS)),
            },
            NodeProperty {
                display_name: "Binary Property Name",
                name: param_names::BINARY_PROPERTY_NAME,
                kind: PropertyType::String,
                default: json!("data"),
                required: true,
                placeholder: Some("data"),
                description: Some("Name of the binary property that contains the image file"),
                options: Vec::new(),
                display_options: Some(DisplayOptions::show(&[
                    (param_names::RESOURCE, &["document"]),
                    (param_names::OPERATION, &["process"]),
                    (param_names::IMAGE_SOURCE, &["upload"]),
                ])),
            },
            NodeProperty {
                display_name: "Base64 Image",
                name: param_names::BASE64_IMAGE,
                kind: PropertyType::String,
                default: json!(""),
                required: true,
                placeholder: Some("Enter Base64 encoded image string"),
                description: Some(
                    "Provide the Base64 encoded image data (with or without data URI prefix)",
                ),
                options: Vec::new(),
                display_options: Some(DisplayOptions::show(&[
                    (param_names::RESOURCE, &["document"]),
                    (param_names::OPERATION, &["process"]),
                    (param_names::IMAGE_SOURCE, &["base64"]),
                ])),
            },
        ],
    }
}

/// Resources exposed by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Document,
}

/// Operations exposed by the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Process a document image against a template
    Process,
}

impl Operation {
    /// Read the selected resource and operation of an item
    pub fn resolve<C>(ctx: &C, item_index: usize) -> Result<(Resource, Operation), ProcessingError>
    where
        C: BatchContext + ?Sized,
    {
        let resource = ParameterResolver::string_parameter(ctx, param_names::RESOURCE, item_index)?
            .unwrap_or_else(|| "document".to_string());
        let resource = match resource.trim() {
            "document" => Resource::Document,
            other => {
                return Err(ProcessingError::invalid_parameter(
                    param_names::RESOURCE,
                    format!("unsupported resource '{}'", other),
                ));
            }
        };

        let operation =
            ParameterResolver::string_parameter(ctx, param_names::OPERATION, item_index)?
                .unwrap_or_else(|| "process".to_string());
        match (resource, operation.trim()) {
            (Resource::Document, "process") => Ok((resource, Operation::Process)),
            (_, other) => Err(ProcessingError::invalid_parameter(
                param_names::OPERATION,
                format!("unsupported operation '{}'", other),
            )),
        }
    }
}
