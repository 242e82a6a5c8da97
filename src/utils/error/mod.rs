//! Error handling for the batch processor
//!
//! This module defines the error types shared by the processing pipeline, the batch driver and
//! the configuration layer.

mod helpers;
mod types;

pub use types::{BatchError, ConfigError, ProcessingError, Result};
