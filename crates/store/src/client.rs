//! HTTP client for the storage collaborator's REST interface.
//!
//! [`StoreClient`] holds the connection configuration for the remote
//! store and issues one HTTP call per operation: no caching, no retries.
//! Error payloads from the collaborator are surfaced verbatim so the
//! caller can show them to the operator.

use std::time::Duration;

use acehive_core::types::Row;
use serde::Serialize;

/// Connection settings for the storage collaborator.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Service API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
}

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl StoreConfig {
    /// Load store configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `STORE_URL`          | **yes**  | --      |
    /// | `STORE_API_KEY`      | **yes**  | --      |
    /// | `STORE_TIMEOUT_SECS` | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing, which is the desired
    /// fail-fast behaviour at startup.
    pub fn from_env() -> Self {
        let base_url = std::env::var("STORE_URL").expect("STORE_URL must be set");
        let api_key = std::env::var("STORE_API_KEY").expect("STORE_API_KEY must be set");
        let timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }
}

/// Errors from storage collaborator calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connect, timeout, transport).
    #[error("Request to storage service failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The collaborator answered with an error payload. The message is
    /// the collaborator's, verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The collaborator answered 2xx but the body was not decodable.
    #[error("Invalid response from storage service: {0}")]
    Decode(String),
}

/// Client for the storage collaborator.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl StoreClient {
    /// Build a client from configuration.
    ///
    /// The request timeout is applied to every call made through this
    /// client; a stalled collaborator surfaces as a `Request` error
    /// instead of an indefinite wait.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Fetch every row of the named table.
    pub async fn select_all(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        self.select_where(table, &[]).await
    }

    /// Fetch rows where `column` equals `value`.
    pub async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<Row>, StoreError> {
        self.select_where(table, &[(column, value)]).await
    }

    /// Fetch rows matching every `(column, value)` equality filter.
    pub async fn select_where(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Row>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        for &(column, value) in filters {
            query.push((column, format!("eq.{value}")));
        }

        tracing::debug!(table, filters = filters.len(), "Selecting rows from store");

        let response = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await?;

        let response = check_status(response, table).await?;
        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Insert one record into the named table.
    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        tracing::debug!(table, "Inserting record into store");

        let response = self
            .http
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        check_status(response, table).await?;
        Ok(())
    }

    /// Check a username/password pair against the `auth` credential table.
    ///
    /// Plain equality match on the `user` and `pwd` columns; zero rows
    /// means the credentials are wrong, not that the call failed.
    pub async fn check_credential(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let rows = self
            .select_where("auth", &[("user", username), ("pwd", password)])
            .await?;
        Ok(!rows.is_empty())
    }

    /// Probe the collaborator's REST root for reachability.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let response = self
            .http
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        check_status(response, "/").await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`StoreError::Api`], keeping the
/// collaborator's own message where one is present.
async fn check_status(
    response: reqwest::Response,
    table: &str,
) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body, status.as_u16());
    tracing::warn!(table, status = status.as_u16(), %message, "Store call failed");

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Pull the `message` field out of a collaborator error body, falling
/// back to the raw body, then to the status code.
fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("Storage service returned status {status}")
    } else {
        body.trim().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
