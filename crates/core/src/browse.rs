//! Table browsing: schema inference, filtering, and the browse session.
//!
//! The engine works over dynamically-shaped rows ([`Row`]) fetched from an
//! arbitrary named table. The column set is inferred from the first row of
//! each fetch; no fixed schema registry exists. Filtering is pure and
//! always recomputes from the fetched snapshot, never from a previously
//! filtered set.

use serde_json::Value;

use crate::types::Row;

// ---------------------------------------------------------------------------
// Schema inference
// ---------------------------------------------------------------------------

/// Infer the column set from the key set of the first row.
///
/// An empty result set yields an empty column set; callers render that as
/// the explicit "no data" state rather than an error.
pub fn infer_columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Composable client-side filters over a fetched row set.
///
/// Unset or empty fields are inactive. Predicates compose by logical AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseQuery {
    /// Equality filter on the `year` column.
    pub year: Option<String>,
    /// Equality filter on the `resource_type` column.
    pub resource_type: Option<String>,
    /// Case-insensitive substring match on the `title` column.
    pub search: Option<String>,
}

impl BrowseQuery {
    /// A query with only the search predicate set, as used by live
    /// search-as-you-type recomputation.
    pub fn search_only(text: &str) -> Self {
        Self {
            search: Some(text.to_string()),
            ..Self::default()
        }
    }
}

/// Treat `None` and `""` uniformly as "filter not active".
fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn matches(row: &Row, query: &BrowseQuery) -> bool {
    if let Some(year) = active(&query.year) {
        if row.get("year").and_then(Value::as_str) != Some(year) {
            return false;
        }
    }
    if let Some(resource_type) = active(&query.resource_type) {
        if row.get("resource_type").and_then(Value::as_str) != Some(resource_type) {
            return false;
        }
    }
    if let Some(search) = active(&query.search) {
        // Rows without a (string) title never match a search.
        let Some(title) = row.get("title").and_then(Value::as_str) else {
            return false;
        };
        if !title.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Apply the query's predicates over the full row set.
///
/// Pure: the source rows are never mutated, and applying the same query
/// twice yields the same result.
pub fn apply(rows: &[Row], query: &BrowseQuery) -> Vec<Row> {
    rows.iter().filter(|row| matches(row, query)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Browse session
// ---------------------------------------------------------------------------

/// A failed table fetch, carrying the table name and the collaborator's
/// message. Distinct from an empty result, which is a valid state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to fetch table '{table}': {message}")]
pub struct FetchError {
    pub table: String,
    pub message: String,
}

/// Correlates a fetch completion with the selection that started it.
///
/// Selecting another table while a fetch is in flight bumps the session
/// generation, so the eventual stale response no longer matches and is
/// discarded instead of overwriting newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// What the caller should render for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState<'a> {
    /// A fetch is in flight; show a loading indicator.
    Loading,
    /// The fetch failed; show the error banner and offer a retry.
    Failed(&'a FetchError),
    /// The fetch settled but no rows remain after filtering; show the
    /// explicit "no data" indicator.
    Empty,
    /// Rows to display.
    Data(&'a [Row]),
}

/// Stateful browsing over one table at a time.
///
/// Holds the immutable fetched snapshot plus the filtered view derived
/// from it. The snapshot is replaced wholesale on every table selection;
/// every recomputation starts from it.
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    table: Option<String>,
    generation: u64,
    loading: bool,
    error: Option<FetchError>,
    snapshot: Vec<Row>,
    columns: Vec<String>,
    query: BrowseQuery,
    filtered: Vec<Row>,
    filters_applied: bool,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected table, if any.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Columns inferred from the current snapshot (pre-sanitization).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The full fetched snapshot.
    pub fn snapshot(&self) -> &[Row] {
        &self.snapshot
    }

    /// The currently filtered view.
    pub fn rows(&self) -> &[Row] {
        &self.filtered
    }

    pub fn query(&self) -> &BrowseQuery {
        &self.query
    }

    /// Whether the explicit "filters applied" indicator is raised.
    pub fn filters_applied(&self) -> bool {
        self.filters_applied
    }

    /// Select a table and start a new fetch.
    ///
    /// Clears the previous snapshot and any error, and returns the ticket
    /// the eventual fetch result must present. Any fetch started for a
    /// previous selection becomes stale from this point on.
    pub fn select_table(&mut self, name: &str) -> FetchTicket {
        self.generation += 1;
        self.table = Some(name.to_string());
        self.loading = true;
        self.error = None;
        self.snapshot.clear();
        self.columns.clear();
        self.filtered.clear();
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Install a fetch result. Returns `false` (and changes nothing) if the
    /// ticket is stale, i.e. another table was selected meanwhile.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, rows: Vec<Row>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        self.columns = infer_columns(&rows);
        self.filtered = rows.clone();
        self.snapshot = rows;
        true
    }

    /// Record a fetch failure. Stale failures are discarded like stale
    /// results.
    pub fn fail_fetch(&mut self, ticket: FetchTicket, message: &str) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        self.error = Some(FetchError {
            table: self.table.clone().unwrap_or_default(),
            message: message.to_string(),
        });
        true
    }

    pub fn set_year_filter(&mut self, year: &str) {
        self.query.year = Some(year.to_string());
    }

    pub fn set_resource_type_filter(&mut self, resource_type: &str) {
        self.query.resource_type = Some(resource_type.to_string());
    }

    /// Live search: recompute immediately from the full snapshot using the
    /// title predicate alone.
    ///
    /// Other filter fields keep their values but do not participate until
    /// the next explicit apply, so clearing the search box restores all
    /// rows regardless of their visual state.
    pub fn set_search(&mut self, text: &str) {
        self.query.search = Some(text.to_string());
        self.filtered = if text.is_empty() {
            self.snapshot.clone()
        } else {
            apply(&self.snapshot, &BrowseQuery::search_only(text))
        };
    }

    /// Explicit apply: recompute from the full snapshot with every active
    /// predicate and raise the "filters applied" indicator.
    pub fn apply_filters(&mut self) {
        self.filtered = apply(&self.snapshot, &self.query);
        self.filters_applied = true;
    }

    /// Clear all filter fields, restore the full snapshot, and lower the
    /// indicator.
    pub fn reset_filters(&mut self) {
        self.query = BrowseQuery::default();
        self.filtered = self.snapshot.clone();
        self.filters_applied = false;
    }

    /// The state the caller should render right now.
    pub fn render_state(&self) -> RenderState<'_> {
        if self.loading {
            RenderState::Loading
        } else if let Some(err) = &self.error {
            RenderState::Failed(err)
        } else if self.filtered.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Data(&self.filtered)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
