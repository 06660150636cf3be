//! Route definitions for the `/tables` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tables;
use crate::state::AppState;

/// Routes mounted at `/tables`.
///
/// ```text
/// GET /{name}  -> browse (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{name}", get(tables::browse))
}
