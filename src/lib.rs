//! # docuprox-batch
//!
//! Batch item processor for the DocuProx document-processing API.
//!
//! Every input item is turned into one authenticated `POST` to the DocuProx process endpoint. The
//! image comes either from a binary attachment on the item or from an inline base64 string (a
//! `data:` URI prefix is stripped). Failures are isolated per item when continue-on-failure is
//! enabled; otherwise the first failing item aborts the batch.
//!
//! ## Features
//!
//! - **Per-item isolation**: one failure record per failing item, output order matches input order
//! - **Pluggable host**: items, parameters and attachments come through [`BatchContext`]
//! - **Pluggable transport**: any [`HttpTransport`], with the API key injected by a credential
//!   middleware
//! - **Manifest runner**: the `docuprox` binary runs batches described in JSON or YAML files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docuprox_batch::{BatchManifest, DocuProxApiCredential, DocuProxNode, ReqwestTransport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let node = DocuProxNode::new(
//!         ReqwestTransport::new()?,
//!         DocuProxApiCredential::new("dp_live_key")?,
//!     );
//!
//!     let batch = BatchManifest::new()
//!         .with_continue_on_failure(true)
//!         .with_item(json!({
//!             "templateId": "invoice-v2",
//!             "imageSource": "base64",
//!             "base64Image": "data:image/png;base64,iVBORw0KGgo="
//!         }));
//!
//!     for output in node.execute(&batch).await? {
//!         println!("{}", serde_json::to_string(&output)?);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod host;
pub mod node;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::batch::{BatchDriver, BatchReport, BatchSummary};
pub use crate::core::context::BatchContext;
pub use crate::core::dispatcher::{DEFAULT_TIMEOUT, DOCUPROX_PROCESS_URL, Dispatcher};
pub use crate::core::transport::{
    AuthenticatedTransport, Credential, HttpRequest, HttpResponse, HttpTransport,
    ReqwestTransport, TransportError,
};
pub use crate::core::types::{ImageSource, ItemOutput, Outcome, ProcessingParameters, RequestEnvelope};
pub use host::BatchManifest;
pub use node::{DocuProxApiCredential, DocuProxNode, node_description};
pub use utils::error::{BatchError, ConfigError, ProcessingError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Version with the commit it was built from, as printed by `docuprox --version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DOCUPROX_GIT_HASH"),
    ")"
);
