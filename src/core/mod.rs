//! Core per-item processing pipeline
//!
//! Leaf first: parameter resolution, image source strategies, request building, authenticated
//! dispatch and the batch driver tying them together. The host, the credential store and the
//! HTTP transport are reached only through traits.

pub mod batch;
pub mod context;
pub mod dispatcher;
pub mod image_source;
pub mod request;
pub mod resolver;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use batch::{BatchDriver, BatchReport, BatchSummary};
pub use context::BatchContext;
pub use dispatcher::{DEFAULT_TIMEOUT, DOCUPROX_PROCESS_URL, Dispatcher};
pub use image_source::{ImageSourceStrategy, strip_data_uri_prefix};
pub use request::RequestBuilder;
pub use resolver::{DEFAULT_BINARY_PROPERTY_NAME, ParameterResolver};
