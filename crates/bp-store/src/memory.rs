//! In-memory table double with insert-if-absent semantics.
//!
//! Mirrors the remote store's contract closely enough for recorder tests:
//! atomic insert-if-absent per (table, partition key, row key), plus a
//! failure-injection hook for exercising error propagation.

use crate::{InsertOutcome, StoreError, TableStore};
use bp_common::PerfEvent;
use std::collections::HashMap;
use std::sync::Mutex;

type Key = (String, String, String);

/// Rows keyed by (table, partition key, row key).
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: Mutex<HashMap<Key, PerfEvent>>,
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next insert fail with `err` instead of touching rows.
    pub fn fail_next(&self, err: StoreError) {
        *self.fail_next.lock().expect("lock poisoned") = Some(err);
    }

    /// Total number of stored rows across all tables.
    pub fn len(&self) -> usize {
        self.rows.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row stored under (table, partition key, row key), if any.
    pub fn get(&self, table: &str, partition_key: &str, row_key: &str) -> Option<PerfEvent> {
        let key = (
            table.to_string(),
            partition_key.to_string(),
            row_key.to_string(),
        );
        self.rows.lock().expect("lock poisoned").get(&key).cloned()
    }

    /// Row keys currently stored in one partition of `table`, sorted.
    pub fn row_keys(&self, table: &str, partition_key: &str) -> Vec<String> {
        let rows = self.rows.lock().expect("lock poisoned");
        let mut keys: Vec<String> = rows
            .keys()
            .filter(|(t, pk, _)| t == table && pk == partition_key)
            .map(|(_, _, rk)| rk.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl TableStore for MemoryTable {
    fn insert(&self, table: &str, event: &PerfEvent) -> Result<InsertOutcome, StoreError> {
        if let Some(err) = self.fail_next.lock().expect("lock poisoned").take() {
            return Err(err);
        }
        let key = (
            table.to_string(),
            event.partition_key.0.clone(),
            event.row_key.0.clone(),
        );
        let mut rows = self.rows.lock().expect("lock poisoned");
        if rows.contains_key(&key) {
            return Ok(InsertOutcome::Conflict);
        }
        rows.insert(key, event.clone());
        Ok(InsertOutcome::Inserted)
    }
}
