//! Host capability object injected into the batch driver

use crate::utils::error::{BatchError, ProcessingError};
use async_trait::async_trait;
use serde_json::Value;

/// Everything the pipeline needs from the host running the batch
///
/// Implementations own the input items, the parameter store and the binary attachments. The core
/// only ever reads through this trait.
#[async_trait]
pub trait BatchContext: Send + Sync {
    /// Number of input items
    fn item_count(&self) -> usize;

    /// Raw value of a parameter for an item, `None` when the host has no value
    fn get_parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    /// Full content of a named attachment on an item
    ///
    /// Absent or unreadable attachments must fail with
    /// [`ProcessingError::AttachmentUnavailable`].
    async fn get_attachment_bytes(
        &self,
        item_index: usize,
        name: &str,
    ) -> Result<Vec<u8>, ProcessingError>;

    /// Whether item failures become failure records instead of aborting the run
    fn continue_on_failure(&self) -> bool;

    /// Error used to abort the run at `item_index`
    fn abort_with_index(&self, item_index: usize, error: ProcessingError) -> BatchError {
        BatchError::at_item(item_index, error)
    }
}
