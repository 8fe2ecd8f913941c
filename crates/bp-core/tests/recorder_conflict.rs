//! Recorder behavior against an in-memory table.
//!
//! These tests exercise the conflict-resolving insert end to end: the
//! common no-collision case, the microsecond walk under contention, the
//! opt-in retry ceiling, and error propagation.

use bp_common::{PartitionKey, PerfEvent};
use bp_config::{BatchIdentity, RecorderConfig, StorageCredentials};
use bp_core::recorder::{record_event, RecordError, RecordRequest};
use bp_store::{MemoryTable, StoreError, TableStore};

fn config() -> RecorderConfig {
    RecorderConfig {
        identity: BatchIdentity {
            batch_account: "acct".to_string(),
            pool_id: "pool".to_string(),
            node_id: "tvm-001".to_string(),
        },
        credentials: StorageCredentials {
            account: "stor".to_string(),
            endpoint_suffix: "core.windows.net".to_string(),
            key: "dW51c2Vk".to_string(),
        },
    }
}

fn request(ts: f64, message: Option<&str>, max_attempts: Option<u32>) -> RecordRequest<'static> {
    RecordRequest {
        table: "perf",
        source: "batch",
        event: "jobstart",
        ts,
        message: message.map(str::to_string),
        max_attempts,
    }
}

/// Seed a row exactly as a sibling node's recorder would have written it.
fn seed(store: &MemoryTable, ts: f64) {
    let event = PerfEvent::new(
        PartitionKey::new("acct", "pool"),
        ts,
        "batch",
        "jobstart",
        "tvm-002",
        None,
    );
    let outcome = store.insert("perf", &event).expect("seed insert succeeds");
    assert_eq!(outcome, bp_store::InsertOutcome::Inserted);
}

#[test]
fn uncontended_insert_lands_at_the_given_timestamp() {
    let store = MemoryTable::new();
    let row_key = record_event(&store, &config(), &request(1000000000.0, Some("hello"), None))
        .expect("insert succeeds");

    assert_eq!(row_key.0, "1000000000.0");
    let stored = store
        .get("perf", "acct$pool", "1000000000.0")
        .expect("row exists");
    assert_eq!(stored.event, "batch:jobstart");
    assert_eq!(stored.node_id, "tvm-001");
    assert_eq!(stored.message.as_deref(), Some("hello"));
}

#[test]
fn identical_reinsert_gets_a_nudged_key_not_an_overwrite() {
    let store = MemoryTable::new();
    let cfg = config();

    let first = record_event(&store, &cfg, &request(1000000000.0, Some("hello"), None))
        .expect("first insert succeeds");
    let second = record_event(&store, &cfg, &request(1000000000.0, Some("again"), None))
        .expect("second insert succeeds");

    assert_eq!(first.0, "1000000000.0");
    assert_eq!(second.0, "1000000000.000001");
    assert_eq!(
        store.row_keys("perf", "acct$pool"),
        vec!["1000000000.0", "1000000000.000001"]
    );
    let original = store
        .get("perf", "acct$pool", "1000000000.0")
        .expect("first row still present");
    assert_eq!(original.message.as_deref(), Some("hello"));
}

#[test]
fn distinct_timestamps_never_collide() {
    let store = MemoryTable::new();
    let cfg = config();

    record_event(&store, &cfg, &request(1000.0, None, None)).expect("insert succeeds");
    record_event(&store, &cfg, &request(2000.0, None, None)).expect("insert succeeds");

    assert_eq!(store.row_keys("perf", "acct$pool"), vec!["1000.0", "2000.0"]);
}

#[test]
fn conflicts_walk_microseconds_until_a_free_key() {
    let store = MemoryTable::new();
    let base = 1000000000.0_f64;

    // Occupy the first three keys of the walk with the same arithmetic the
    // recorder uses, so the fourth is the first free one.
    let mut ts = base;
    seed(&store, ts);
    ts += 0.000001;
    seed(&store, ts);
    ts += 0.000001;
    seed(&store, ts);
    let expected = bp_common::RowKey::from_timestamp(ts + 0.000001);

    let row_key =
        record_event(&store, &config(), &request(base, None, None)).expect("insert succeeds");

    assert_eq!(row_key, expected);
    assert_eq!(store.len(), 4, "seeded rows must all survive");
}

#[test]
fn retry_ceiling_stops_the_walk() {
    let store = MemoryTable::new();
    let base = 1000000000.0_f64;

    let mut ts = base;
    for _ in 0..5 {
        seed(&store, ts);
        ts += 0.000001;
    }

    let err = record_event(&store, &config(), &request(base, None, Some(3))).unwrap_err();
    match err {
        RecordError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(store.len(), 5, "a capped walk must not write anything");
}

#[test]
fn non_conflict_store_errors_propagate() {
    let store = MemoryTable::new();
    store.fail_next(StoreError::Service {
        status: 403,
        detail: "auth failed".to_string(),
    });

    let err = record_event(&store, &config(), &request(1.0, None, None)).unwrap_err();
    match err {
        RecordError::Store(StoreError::Service { status, .. }) => assert_eq!(status, 403),
        other => panic!("expected a service error, got {other:?}"),
    }
    assert!(store.is_empty());
}
