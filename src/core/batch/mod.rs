//! Batch driver for running the per-item pipeline over a whole input batch
//!
//! Items are processed strictly in order. Each item is resolved, encoded, wrapped and dispatched
//! before the next one starts; failures are either recorded or abort the run depending on the
//! context's continue-on-failure flag.

mod driver;
mod types;


pub use driver::BatchDriver;
pub use types::{BatchReport, BatchSummary};
