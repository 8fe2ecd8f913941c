//! Azure Table REST client.
//!
//! Implements insert-entity against the Table service with SharedKeyLite
//! request signing. Requests are synchronous and blocking with no timeout:
//! the one operation this program performs is the insert, and the process
//! has nothing else to do while it waits.

use crate::{InsertOutcome, StoreError, TableStore};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bp_common::PerfEvent;
use bp_config::StorageCredentials;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Table service REST version sent with every request.
const API_VERSION: &str = "2019-02-02";

/// Errors from client construction.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("storage account key is not valid base64: {0}")]
    BadKey(String),
}

/// Blocking client bound to the Table service of one storage account.
///
/// Lives for the process only; no caching or connection reuse across
/// invocations.
#[derive(Debug, Clone)]
pub struct AzureTableClient {
    account: String,
    endpoint: String,
    key: Vec<u8>,
}

impl AzureTableClient {
    /// Bind a client to the account in `creds`.
    ///
    /// The account key is base64 as handed out by the storage service; a key
    /// that does not decode is a configuration problem, caught here before
    /// any request is made.
    pub fn new(creds: &StorageCredentials) -> Result<Self, ClientError> {
        let key = BASE64
            .decode(creds.key.trim())
            .map_err(|e| ClientError::BadKey(e.to_string()))?;
        Ok(AzureTableClient {
            account: creds.account.clone(),
            endpoint: format!("https://{}.table.{}", creds.account, creds.endpoint_suffix),
            key,
        })
    }

    /// URL of the insert-entity endpoint for `table`.
    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.endpoint, table)
    }

    /// SharedKeyLite signature over `{x-ms-date}\n{canonicalized resource}`.
    fn sign(&self, date: &str, table: &str) -> String {
        let string_to_sign = format!("{}\n/{}/{}", date, self.account, table);
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(string_to_sign.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// `Authorization` header value for a request against `table` at `date`.
    fn authorization(&self, date: &str, table: &str) -> String {
        format!("SharedKeyLite {}:{}", self.account, self.sign(date, table))
    }
}

impl TableStore for AzureTableClient {
    fn insert(&self, table: &str, event: &PerfEvent) -> Result<InsertOutcome, StoreError> {
        let body = serde_json::to_string(event)?;
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();

        debug!(table, row_key = %event.row_key, "inserting entity");
        let response = ureq::post(&self.table_url(table))
            .set("Authorization", &self.authorization(&date, table))
            .set("x-ms-date", &date)
            .set("x-ms-version", API_VERSION)
            .set("DataServiceVersion", "3.0;NetFx")
            .set("Content-Type", "application/json")
            .set("Accept", "application/json;odata=nometadata")
            .set("Prefer", "return-no-content")
            .send_string(&body);

        match response {
            Ok(_) => Ok(InsertOutcome::Inserted),
            // 409 means the (partition key, row key) pair is taken. The
            // caller renegotiates the key; nothing else maps to a retry.
            Err(ureq::Error::Status(409, _)) => Ok(InsertOutcome::Conflict),
            Err(ureq::Error::Status(status, resp)) => {
                let detail = resp
                    .into_string()
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                Err(StoreError::Service { status, detail })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(StoreError::Transport(transport.to_string()))
            }
        }
    }
}
