//! batchperf table-store client.
//!
//! This crate provides:
//! - The insert-if-absent seam the recorder drives ([`TableStore`])
//! - Typed insert outcomes so a key conflict is a branch, not an exception
//! - The Azure Table REST implementation with SharedKeyLite signing
//! - An in-memory double (feature `test-utils`) for recorder tests

pub mod azure;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use bp_common::PerfEvent;
use thiserror::Error;

pub use azure::{AzureTableClient, ClientError};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryTable;

/// Outcome of an optimistic insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was created.
    Inserted,
    /// A row with the same (partition key, row key) already exists.
    Conflict,
}

/// Errors from the table store other than key conflicts.
///
/// A conflict is an [`InsertOutcome`], not an error: the recorder resolves
/// it locally and it never surfaces to the caller. Everything here is fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error talking to the table store: {0}")]
    Transport(String),

    #[error("table store rejected the request: HTTP {status}: {detail}")]
    Service { status: u16, detail: String },

    #[error("could not serialize entity: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Insert-if-absent handle to a table service.
///
/// Implementations must provide the store's atomic "insert fails if the key
/// exists" primitive; the recorder relies on it as its only concurrency
/// control.
pub trait TableStore {
    /// Attempt to create `event` in `table`.
    fn insert(&self, table: &str, event: &PerfEvent) -> Result<InsertOutcome, StoreError>;
}
