//! Handler for the `/tables` resource (generic table browsing).
//!
//! Fetches all rows of an arbitrary named table from the storage
//! collaborator, infers the column set from the result, hides sensitive
//! columns per the sanitization policy, and applies the composable
//! client-side filters. The same visible-column list produces both the
//! header and the row cells, so the two cannot diverge.

use acehive_core::browse::{BrowseSession, FetchError, RenderState};
use acehive_core::columns::project_row;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// How the filter fields should be evaluated.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrowseMode {
    /// Explicit "apply filters": every active predicate participates and
    /// the filters-applied indicator is raised.
    #[default]
    Apply,
    /// Live search-as-you-type: only the title search participates,
    /// recomputed from the full row set.
    Live,
}

/// Query parameters for `GET /tables/{name}`.
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub year: Option<String>,
    pub resource_type: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub mode: BrowseMode,
}

impl BrowseParams {
    fn has_filters(&self) -> bool {
        self.year.is_some() || self.resource_type.is_some() || self.search.is_some()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A browsed table: sanitized header plus row cells aligned with it.
#[derive(Debug, Serialize)]
pub struct TableView {
    pub table: String,
    /// Visible columns after sanitization.
    pub columns: Vec<String>,
    /// One cell per visible column per row, in column order.
    pub rows: Vec<Vec<Value>>,
    /// Rows fetched before filtering.
    pub total: usize,
    /// Rows surviving the active filters.
    pub filtered: usize,
    pub filters_applied: bool,
    /// True when the fetch succeeded but nothing remains to display; the
    /// client renders its "no data" state, not an error.
    pub empty: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tables/{name}
///
/// Browse a named table with optional filters. A collaborator failure
/// maps to a fetch error carrying the table name and the collaborator's
/// message; an empty table is a successful, empty view.
pub async fn browse(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(name): Path<String>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<DataResponse<TableView>>> {
    // 1. One read of all rows for the table.
    let mut session = BrowseSession::new();
    let ticket = session.select_table(&name);
    let rows = state.store.select_all(&name).await.map_err(|e| FetchError {
        table: name.clone(),
        message: e.to_string(),
    })?;
    session.complete_fetch(ticket, rows);

    // 2. Stage the filter fields and evaluate them per trigger mode.
    if let Some(year) = &params.year {
        session.set_year_filter(year);
    }
    if let Some(resource_type) = &params.resource_type {
        session.set_resource_type_filter(resource_type);
    }
    match params.mode {
        BrowseMode::Live => {
            session.set_search(params.search.as_deref().unwrap_or(""));
        }
        BrowseMode::Apply => {
            if let Some(search) = &params.search {
                session.set_search(search);
            }
            if params.has_filters() {
                session.apply_filters();
            }
        }
    }

    // 3. Sanitize once; project every row against the same column list.
    let visible = state.sanitizer.visible_columns(&name, session.columns());
    let cells: Vec<Vec<Value>> = session
        .rows()
        .iter()
        .map(|row| project_row(row, &visible))
        .collect();

    let view = TableView {
        table: name,
        total: session.snapshot().len(),
        filtered: cells.len(),
        filters_applied: session.filters_applied(),
        empty: session.render_state() == RenderState::Empty,
        columns: visible,
        rows: cells,
    };

    Ok(Json(DataResponse { data: view }))
}
