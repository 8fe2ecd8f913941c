//! Top-level failure classification.

use crate::exit_codes::ExitCode;
use crate::recorder::RecordError;
use bp_config::ConfigError;
use bp_store::ClientError;
use thiserror::Error;

/// Failure of one invocation, mapped onto the exit-code taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl AppError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // A bad account key is as much a configuration problem as a
            // malformed credentials variable.
            AppError::Config(_) | AppError::Client(_) => ExitCode::ConfigError,
            AppError::Record(RecordError::RetriesExhausted { .. }) => ExitCode::RetriesExhausted,
            AppError::Record(RecordError::Store(_)) => ExitCode::StoreError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_store::StoreError;

    #[test]
    fn exit_codes_follow_the_error_taxonomy() {
        let config = AppError::Config(ConfigError::MissingVar("AZ_BATCH_POOL_ID"));
        assert_eq!(config.exit_code(), ExitCode::ConfigError);

        let store = AppError::Record(RecordError::Store(StoreError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(store.exit_code(), ExitCode::StoreError);

        let exhausted = AppError::Record(RecordError::RetriesExhausted {
            attempts: 3,
            row_key: "1.000003".to_string(),
        });
        assert_eq!(exhausted.exit_code(), ExitCode::RetriesExhausted);
    }
}
