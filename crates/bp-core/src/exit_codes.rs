//! Exit codes for the batchperf CLI.
//!
//! Exit codes communicate outcome without requiring output parsing.
//! Argument errors exit 2 through clap's usage handling before any of
//! these apply.

/// Exit codes for batchperf invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Event recorded
    Ok = 0,

    /// Configuration error (environment variables, credentials)
    ConfigError = 10,

    /// Table store rejected the request or was unreachable
    StoreError = 11,

    /// Conflict retry ceiling exhausted (only with --max-attempts)
    RetriesExhausted = 12,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
