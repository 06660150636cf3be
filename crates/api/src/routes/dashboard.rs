//! Route definitions for the dashboard widgets.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /counts  -> aggregate counts (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/counts", get(dashboard::counts))
}
