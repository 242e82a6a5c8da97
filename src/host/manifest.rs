//! File-backed batch context

use crate::core::context::BatchContext;
use crate::node::node_description;
use crate::utils::error::{ConfigError, ProcessingError};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where an attachment's bytes come from
///
/// Written as `{ path: ... }` or `{ base64: ... }` in manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttachmentSpec", into = "AttachmentSpec")]
pub enum AttachmentSource {
    /// File on disk, relative paths resolve against the manifest's directory
    Path(PathBuf),
    /// Inline base64 content
    Base64(String),
    /// Bytes supplied programmatically, written back out as base64
    Bytes(Vec<u8>),
}

/// Manifest form of an attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttachmentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base64: Option<String>,
}

impl TryFrom<AttachmentSpec> for AttachmentSource {
    type Error = String;

    fn try_from(spec: AttachmentSpec) -> Result<Self, Self::Error> {
        match (spec.path, spec.base64) {
            (Some(path), None) => Ok(AttachmentSource::Path(path)),
            (None, Some(encoded)) => Ok(AttachmentSource::Base64(encoded)),
            (Some(_), Some(_)) => Err("attachment sets both `path` and `base64`".to_string()),
            (None, None) => Err("attachment needs either `path` or `base64`".to_string()),
        }
    }
}

impl From<AttachmentSource> for AttachmentSpec {
    fn from(source: AttachmentSource) -> Self {
        match source {
            AttachmentSource::Path(path) => Self {
                path: Some(path),
                base64: None,
            },
            AttachmentSource::Base64(encoded) => Self {
                path: None,
                base64: Some(encoded),
            },
            AttachmentSource::Bytes(bytes) => Self {
                path: None,
                base64: Some(STANDARD.encode(bytes)),
            },
        }
    }
}

/// One input item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestItem {
    /// Per-item parameter values, taking precedence over shared ones
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub attachments: BTreeMap<String, AttachmentSource>,
}

/// A batch described in a JSON or YAML document
///
/// ```yaml
/// continueOnFailure: true
/// parameters:
///   templateId: invoice-v2
/// items:
///   - attachments:
///       data: { path: scans/0001.png }
///   - parameters:
///       imageSource: base64
///       base64Image: "data:image/png;base64,iVBORw0KGgo="
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchManifest {
    #[serde(default)]
    pub continue_on_failure: bool,
    /// Parameter values shared by all items
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub items: Vec<ManifestItem>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl BatchManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest; `.json` files are parsed as JSON, anything else as YAML
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading batch manifest from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let manifest = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(items = manifest.items.len(), "Batch manifest loaded");
        Ok(manifest.with_base_dir(base_dir))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_continue_on_failure(mut self, continue_on_failure: bool) -> Self {
        self.continue_on_failure = continue_on_failure;
        self
    }

    /// Set a parameter shared by all items
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Append an item; `parameters` should be a JSON object
    pub fn with_item(mut self, parameters: Value) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.items.push(ManifestItem {
            parameters,
            attachments: BTreeMap::new(),
        });
        self
    }

    /// Attach bytes to the last item, creating an empty item if there is none
    pub fn with_attachment(self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.with_attachment_source(name, AttachmentSource::Bytes(bytes))
    }

    /// Attach a file to the last item
    pub fn with_attachment_path(self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.with_attachment_source(name, AttachmentSource::Path(path.into()))
    }

    fn with_attachment_source(mut self, name: impl Into<String>, source: AttachmentSource) -> Self {
        if self.items.is_empty() {
            self.items.push(ManifestItem::default());
        }
        if let Some(item) = self.items.last_mut() {
            item.attachments.insert(name.into(), source);
        }
        self
    }

    /// Directory relative attachment paths resolve against
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl BatchContext for BatchManifest {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn get_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.items
            .get(item_index)
            .and_then(|item| item.parameters.get(name))
            .or_else(|| self.parameters.get(name))
            .or_else(|| node_description().default_for(name))
            .cloned()
    }

    async fn get_attachment_bytes(
        &self,
        item_index: usize,
        name: &str,
    ) -> Result<Vec<u8>, ProcessingError> {
        let item = self.items.get(item_index).ok_or_else(|| {
            ProcessingError::attachment_unavailable(name, format!("item {} does not exist", item_index))
        })?;

        let source = item.attachments.get(name).ok_or_else(|| {
            ProcessingError::attachment_unavailable(
                name,
                format!("item {} has no binary data with this name", item_index),
            )
        })?;

        match source {
            AttachmentSource::Bytes(bytes) => Ok(bytes.clone()),
            AttachmentSource::Base64(encoded) => STANDARD
                .decode(encoded.trim())
                .map_err(|e| ProcessingError::attachment_unavailable(name, format!("invalid base64: {}", e))),
            AttachmentSource::Path(path) => {
                let path = self.resolve_path(path);
                debug!(item_index, attachment = name, path = %path.display(), "Reading attachment");
                tokio::fs::read(&path).await.map_err(|e| {
                    ProcessingError::attachment_unavailable(
                        name,
                        format!("failed to read {}: {}", path.display(), e),
                    )
                })
            }
        }
    }

    fn continue_on_failure(&self) -> bool {
        self.continue_on_failure
    }
}
