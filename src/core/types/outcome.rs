//! Per-item outcome records emitted by the batch driver

use crate::utils::error::ProcessingError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Successful API call for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessOutcome {
    /// Always `true`
    pub success: bool,
    pub template_id: String,
    /// Decoded API response
    pub response: Value,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Failed item, recorded in continue-on-failure mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureOutcome {
    /// Always `false`
    pub success: bool,
    pub error: String,
    /// Error body or data returned with the failure, `null` when absent
    pub error_details: Option<Value>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Outcome of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Success(SuccessOutcome),
    Failure(FailureOutcome),
}

impl Outcome {
    pub fn success(template_id: impl Into<String>, response: Value) -> Self {
        Outcome::Success(SuccessOutcome {
            success: true,
            template_id: template_id.into(),
            response,
            timestamp: Utc::now(),
        })
    }

    pub fn failure(error: &ProcessingError) -> Self {
        Outcome::Failure(FailureOutcome {
            success: false,
            error: error.to_string(),
            error_details: error.details().cloned(),
            timestamp: Utc::now(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Link from an output record back to its input item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One entry of the batch output collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutput {
    pub json: Outcome,
    #[serde(rename = "pairedItem")]
    pub paired_item: PairedItem,
}

impl ItemOutput {
    pub fn new(item_index: usize, outcome: Outcome) -> Self {
        Self {
            json: outcome,
            paired_item: PairedItem { item: item_index },
        }
    }

    pub fn item_index(&self) -> usize {
        self.paired_item.item
    }

    pub fn is_success(&self) -> bool {
        self.json.is_success()
    }
}
