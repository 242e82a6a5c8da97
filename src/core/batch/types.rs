//! Batch run result types

use crate::core::types::ItemOutput;
use std::time::Duration;

/// Counts and timing for a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items in the input batch
    pub total: usize,
    /// Items that produced a success record
    pub succeeded: usize,
    /// Items that produced a failure record
    pub failed: usize,
    /// Wall time of the whole run
    pub total_duration: Duration,
}

impl BatchSummary {
    pub fn from_outputs(outputs: &[ItemOutput], total_duration: Duration) -> Self {
        let succeeded = outputs.iter().filter(|o| o.is_success()).count();
        Self {
            total: outputs.len(),
            succeeded,
            failed: outputs.len() - succeeded,
            total_duration,
        }
    }

    /// Average time per item
    pub fn avg_duration(&self) -> Duration {
        if self.total == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos((self.total_duration.as_nanos() / self.total as u128) as u64)
        }
    }
}

/// Output collection together with its summary
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outputs: Vec<ItemOutput>,
    pub summary: BatchSummary,
}
