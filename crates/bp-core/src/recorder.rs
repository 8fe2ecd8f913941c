//! The conflict-resolving insert.
//!
//! Concurrent nodes stamping events in the same microsecond of the same
//! pool partition are the expected source of collisions. Each conflict
//! moves the timestamp forward by one microsecond and retries; the store's
//! atomic insert-if-absent is the only concurrency control involved. The
//! loop is unbounded by default because collisions resolve after a handful
//! of nudges, but callers may set a ceiling.

use bp_common::{PerfEvent, RowKey};
use bp_config::RecorderConfig;
use bp_store::{InsertOutcome, StoreError, TableStore};
use thiserror::Error;
use tracing::{debug, warn};

/// One microsecond, the nudge applied to a colliding timestamp.
const NUDGE_SECONDS: f64 = 0.000001;

/// Errors from recording an event.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("gave up after {attempts} colliding inserts, last row key {row_key}")]
    RetriesExhausted { attempts: u32, row_key: String },
}

/// What to record and how hard to try.
#[derive(Debug, Clone)]
pub struct RecordRequest<'a> {
    pub table: &'a str,
    pub source: &'a str,
    pub event: &'a str,
    /// Posix timestamp in seconds, fractional.
    pub ts: f64,
    pub message: Option<String>,
    /// Conflict-retry ceiling; `None` retries until the insert lands.
    pub max_attempts: Option<u32>,
}

/// Insert one perf event, renegotiating the row key on conflicts.
///
/// Returns the row key the event finally landed under. Conflicts are
/// resolved locally and never surface; every other store failure propagates
/// untouched.
pub fn record_event<S: TableStore>(
    store: &S,
    config: &RecorderConfig,
    request: &RecordRequest<'_>,
) -> Result<RowKey, RecordError> {
    let mut ts = request.ts;
    let mut event = PerfEvent::new(
        config.partition_key(),
        ts,
        request.source,
        request.event,
        &config.identity.node_id,
        request.message.clone(),
    );

    let mut conflicts: u32 = 0;
    loop {
        match store.insert(request.table, &event)? {
            InsertOutcome::Inserted => return Ok(event.row_key),
            InsertOutcome::Conflict => {
                conflicts += 1;
                if let Some(max) = request.max_attempts {
                    if conflicts >= max {
                        warn!(conflicts, row_key = %event.row_key, "conflict retry ceiling reached");
                        return Err(RecordError::RetriesExhausted {
                            attempts: conflicts,
                            row_key: event.row_key.to_string(),
                        });
                    }
                }
                ts += NUDGE_SECONDS;
                debug!(conflicts, row_key = %event.row_key, "row key taken, nudging timestamp");
                event.set_timestamp(ts);
            }
        }
    }
}
