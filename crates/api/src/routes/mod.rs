pub mod auth;
pub mod dashboard;
pub mod health;
pub mod resources;
pub mod tables;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login          login (public)
/// /auth/logout         logout (requires auth)
///
/// /resources           submit a classified resource (POST, requires auth)
///
/// /tables/{name}       browse a named table with filters (GET, requires auth)
///
/// /dashboard/counts    aggregate row counts (GET, requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout).
        .nest("/auth", auth::router())
        // Classified resource submission.
        .nest("/resources", resources::router())
        // Generic table browsing.
        .nest("/tables", tables::router())
        // Aggregate count widgets.
        .nest("/dashboard", dashboard::router())
}
