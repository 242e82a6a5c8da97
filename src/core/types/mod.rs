//! Core type definition module
//!
//! Contains the per-item data model shared by the pipeline stages

pub mod envelope;
pub mod outcome;
pub mod params;

// Re-export all public types
pub use envelope::{ImagePayload, RequestEnvelope};
pub use outcome::{FailureOutcome, ItemOutput, Outcome, PairedItem, SuccessOutcome};
pub use params::{ImageSource, ProcessingParameters, param_names};
