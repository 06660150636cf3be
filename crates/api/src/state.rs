use std::sync::Arc;

use acehive_core::columns::SanitizePolicy;
use acehive_store::StoreClient;

use crate::auth::revocation::RevocationList;
use crate::config::ServerConfig;
use crate::engine::SubmissionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Storage collaborator client.
    pub store: StoreClient,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Revoked access-token ids (session teardown on logout).
    pub revoked: Arc<RevocationList>,
    /// In-flight submission tracking (at most one per user).
    pub submissions: Arc<SubmissionRegistry>,
    /// Per-table column sanitization policy for the browsing surface.
    pub sanitizer: Arc<SanitizePolicy>,
}
