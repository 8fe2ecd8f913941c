//! batchperf configuration.
//!
//! Identity and credentials are resolved from the environment exactly once
//! at process start and handed to the recorder as explicit structs; nothing
//! downstream reads ambient process state.

use bp_common::PartitionKey;
use thiserror::Error;

/// Environment variable holding `account:endpoint_suffix:key`.
pub const STORAGE_CREDS_ENV: &str = "BATCHPERF_STORAGE_CREDS";

/// Batch identity environment variables, set by the batch agent on every
/// compute node.
pub const BATCH_ACCOUNT_ENV: &str = "AZ_BATCH_ACCOUNT_NAME";
pub const POOL_ID_ENV: &str = "AZ_BATCH_POOL_ID";
pub const NODE_ID_ENV: &str = "AZ_BATCH_NODE_ID";

/// Errors from configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("{var} must be account:endpoint_suffix:key, got {fields} field(s)")]
    CredentialFields { var: &'static str, fields: usize },

    #[error("{var} has an empty {field} field")]
    EmptyCredentialField {
        var: &'static str,
        field: &'static str,
    },
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Identity of the batch account, pool, and node this process runs on.
#[derive(Debug, Clone)]
pub struct BatchIdentity {
    pub batch_account: String,
    pub pool_id: String,
    pub node_id: String,
}

impl BatchIdentity {
    /// Read the `AZ_BATCH_*` triplet; any missing variable is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(BatchIdentity {
            batch_account: require_var(BATCH_ACCOUNT_ENV)?,
            pool_id: require_var(POOL_ID_ENV)?,
            node_id: require_var(NODE_ID_ENV)?,
        })
    }
}

/// Table-storage account credentials.
#[derive(Debug, Clone)]
pub struct StorageCredentials {
    pub account: String,
    pub endpoint_suffix: String,
    pub key: String,
}

impl StorageCredentials {
    /// Parse a colon-delimited `account:endpoint_suffix:key` triple.
    ///
    /// The split is strict: exactly three fields, none empty. Parsing is
    /// pure so callers (and tests) never have to touch the process
    /// environment.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = raw.split(':').collect();
        if fields.len() != 3 {
            return Err(ConfigError::CredentialFields {
                var: STORAGE_CREDS_ENV,
                fields: fields.len(),
            });
        }
        for (value, name) in fields.iter().zip(["account", "endpoint_suffix", "key"]) {
            if value.is_empty() {
                return Err(ConfigError::EmptyCredentialField {
                    var: STORAGE_CREDS_ENV,
                    field: name,
                });
            }
        }
        Ok(StorageCredentials {
            account: fields[0].to_string(),
            endpoint_suffix: fields[1].to_string(),
            key: fields[2].to_string(),
        })
    }

    /// Read and parse [`STORAGE_CREDS_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&require_var(STORAGE_CREDS_ENV)?)
    }
}

/// Everything the recorder needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    pub identity: BatchIdentity,
    pub credentials: StorageCredentials,
}

impl RecorderConfig {
    /// Resolve identity and credentials from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(RecorderConfig {
            identity: BatchIdentity::from_env()?,
            credentials: StorageCredentials::from_env()?,
        })
    }

    /// Partition key grouping every event from this pool.
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(&self.identity.batch_account, &self.identity.pool_id)
    }
}
