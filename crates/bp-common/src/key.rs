//! Table-key newtypes.
//!
//! A perf event is addressed by a (partition key, row key) pair in the
//! remote table. The partition key groups every event emitted for one pool;
//! the row key is a stringified POSIX timestamp that must be unique within
//! the partition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Partition key in the form `{batch_account}${pool_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(pub String);

impl PartitionKey {
    /// Build the pool-scoped partition key.
    pub fn new(batch_account: &str, pool_id: &str) -> Self {
        PartitionKey(format!("{}${}", batch_account, pool_id))
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row key: a POSIX timestamp rendered as its shortest round-trip decimal.
///
/// Whole-second stamps keep a trailing `.0` (`1000000000.0`), and nudged
/// stamps render with exactly the digits that survive an `f64` round-trip
/// (`1000000000.000001`), so keys written by different nodes stay mutually
/// parseable and ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub String);

impl RowKey {
    /// Render a timestamp as a row key.
    pub fn from_timestamp(ts: f64) -> Self {
        // Debug formatting keeps the decimal point on whole-second values.
        RowKey(format!("{ts:?}"))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
