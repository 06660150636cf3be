//! Handlers for the dashboard aggregate widgets.
//!
//! Row counts per catalog table plus a breakdown of resources by type,
//! computed through the collaborator's query interface. These are
//! display aids only; nothing here feeds back into classification.

use acehive_core::resource::ResourceType;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Tables surfaced on the dashboard.
const COUNTED_TABLES: &[&str] = &["auth", "collaborations", "resources", "feedback"];

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Row count for one table.
#[derive(Debug, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

/// Resource count for one resource type.
#[derive(Debug, Serialize)]
pub struct ResourceTypeCount {
    pub resource_type: &'static str,
    pub count: usize,
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub tables: Vec<TableCount>,
    pub resources_by_type: Vec<ResourceTypeCount>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/counts
///
/// Aggregate row counts per known table and per resource type.
pub async fn counts(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardCounts>>> {
    let mut tables = Vec::with_capacity(COUNTED_TABLES.len());
    for table in COUNTED_TABLES {
        let rows = state.store.select_all(table).await?;
        tables.push(TableCount {
            table: (*table).to_string(),
            rows: rows.len(),
        });
    }

    let mut resources_by_type = Vec::with_capacity(ResourceType::LABELS.len());
    for label in ResourceType::LABELS {
        let rows = state
            .store
            .select_eq("resources", "resource_type", label)
            .await?;
        resources_by_type.push(ResourceTypeCount {
            resource_type: label,
            count: rows.len(),
        });
    }

    Ok(Json(DataResponse {
        data: DashboardCounts {
            tables,
            resources_by_type,
        },
    }))
}
