//! Command-line surface.
//!
//! Argument validation happens entirely inside clap, before any environment
//! or network access: a missing positional or a malformed `--ts` exits with
//! a usage error and never reaches the store.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

/// Record a perf event from a batch compute node into table storage.
#[derive(Parser, Debug)]
#[command(name = "batchperf", version, about = "Batch pool perf event recorder")]
pub struct Cli {
    /// Event source (lowercased into the stored label)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub source: String,

    /// Event name (lowercased into the stored label)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub event: String,

    /// Posix timestamp in seconds (fractional allowed); defaults to now
    #[arg(long)]
    pub ts: Option<f64>,

    /// Free-text message stored with the event
    #[arg(long)]
    pub message: Option<String>,

    /// Table-name prefix; the target table is named `{prefix}perf`
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Give up after this many colliding inserts instead of retrying forever
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

/// Arguments after normalization: lowercased label parts, defaulted
/// timestamp, resolved table name.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub source: String,
    pub event: String,
    pub ts: f64,
    pub message: Option<String>,
    pub table: String,
    pub max_attempts: Option<u32>,
}

impl Cli {
    /// Resolve raw arguments into an [`Invocation`].
    pub fn resolve(self) -> Invocation {
        Invocation {
            source: self.source.to_lowercase(),
            event: self.event.to_lowercase(),
            ts: self.ts.unwrap_or_else(now_posix),
            message: self.message,
            table: format!("{}perf", self.prefix),
            max_attempts: self.max_attempts,
        }
    }
}

/// Current UTC wall-clock time as fractional seconds since the epoch,
/// microsecond resolution.
fn now_posix() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
