//! Route definitions for the `/resources` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::resources;
use crate::state::AppState;

/// Routes mounted at `/resources`.
///
/// ```text
/// POST /  -> create (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(resources::create))
}
