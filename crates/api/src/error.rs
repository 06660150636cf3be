use acehive_core::browse::FetchError;
use acehive_core::error::CoreError;
use acehive_core::submission::SubmissionError;
use acehive_store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// collaborator failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `acehive_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage collaborator call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A table fetch failed; carries the table name alongside the
    /// collaborator's message.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The caller is not authenticated (missing, invalid, expired, or
    /// revoked token) or presented bad credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A submission is already in flight for this user.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InFlight => AppError::SubmissionInFlight,
            SubmissionError::Invalid(core) => AppError::Core(core),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Storage collaborator errors ---
            AppError::Store(err) => classify_store_error(err),
            AppError::Fetch(err) => {
                tracing::warn!(table = %err.table, error = %err.message, "Table fetch failed");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::SubmissionInFlight => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_FLIGHT",
                self.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a storage collaborator error into an HTTP status, error code,
/// and message.
///
/// The collaborator's own message is surfaced verbatim; these failures are
/// recoverable by retrying the triggering action, so they map to 502
/// rather than 500.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Api { status, message } => {
            tracing::warn!(upstream_status = status, error = %message, "Store returned an error");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone())
        }
        StoreError::Request(inner) => {
            tracing::error!(error = %inner, "Store request failed");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
        StoreError::Decode(msg) => {
            tracing::error!(error = %msg, "Store response was undecodable");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
    }
}
