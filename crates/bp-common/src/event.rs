//! The perf-event entity.
//!
//! One event per process invocation: constructed once, inserted exactly once
//! after possible row-key renegotiation, never updated or deleted.

use crate::key::{PartitionKey, RowKey};
use serde::Serialize;

/// A recorded perf event in its persisted (wire) shape.
///
/// Serializes with the table-store field names: `PartitionKey`, `RowKey`,
/// `Event`, `NodeId`, `Message`. `Message` is omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PerfEvent {
    pub partition_key: PartitionKey,
    pub row_key: RowKey,
    /// `{source}:{event}`, both lowercased.
    pub event: String,
    pub node_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PerfEvent {
    /// Assemble an event record.
    ///
    /// `source` and `event` are lowercased into the stored label regardless
    /// of input casing.
    pub fn new(
        partition_key: PartitionKey,
        ts: f64,
        source: &str,
        event: &str,
        node_id: &str,
        message: Option<String>,
    ) -> Self {
        PerfEvent {
            partition_key,
            row_key: RowKey::from_timestamp(ts),
            event: format!("{}:{}", source.to_lowercase(), event.to_lowercase()),
            node_id: node_id.to_string(),
            message,
        }
    }

    /// Re-key the event after a collision nudge.
    pub fn set_timestamp(&mut self, ts: f64) {
        self.row_key = RowKey::from_timestamp(ts);
    }
}
