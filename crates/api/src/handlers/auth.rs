//! Handlers for the `/auth` resource (login, logout).
//!
//! Credentials live in the storage collaborator's `auth` table and are
//! checked by equality through its query interface. A successful login
//! mints an access token (session init); logout revokes the token's id
//! (session teardown). There is no other session state.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password against the credential table.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Check the credential pair against the collaborator's auth table.
    //    A collaborator failure surfaces as an upstream error, distinct
    //    from a credential mismatch.
    let valid = state
        .store
        .check_credential(&input.username, &input.password)
        .await?;

    // 2. Zero matching rows means bad credentials.
    if !valid {
        return Err(AppError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    // 3. Mint the access token.
    let access_token = generate_access_token(&input.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(username = %input.username, "Staff login");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        username: input.username,
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented token. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    state.revoked.revoke(&user.jti);
    tracing::info!(username = %user.username, "Staff logout");
    Ok(StatusCode::NO_CONTENT)
}
