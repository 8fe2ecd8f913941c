//! batchperf core: CLI surface, recorder loop, and exit codes.
//!
//! The binary in this crate is a one-shot command invoked from job and task
//! lifecycle hooks on a batch compute node. It records a single perf event
//! into the pool's table partition and exits; the inserted row is its only
//! output on success.

pub mod cli;
pub mod error;
pub mod exit_codes;
pub mod recorder;

pub use error::AppError;
pub use exit_codes::ExitCode;
