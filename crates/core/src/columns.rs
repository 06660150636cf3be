//! Per-table column sanitization.
//!
//! Some columns must never reach the browsing surface (internal ids,
//! long-text bodies, denormalized tag arrays). The policy is plain data
//! keyed by table name, so adjusting a drop set is a config edit, not a
//! code change. The same visible-column list drives both header
//! generation and row-cell extraction, which keeps the two aligned by
//! construction.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::Row;

/// Per-table hidden-column policy.
#[derive(Debug, Clone)]
pub struct SanitizePolicy {
    /// Explicit per-table hidden sets. An entry with an empty set means
    /// "show everything" (used for `auth`).
    tables: HashMap<String, Vec<String>>,
    /// Hidden set for tables without an explicit entry.
    fallback: Vec<String>,
}

impl Default for SanitizePolicy {
    /// The console's stock policy:
    ///
    /// - `resources` hides internal and long-text columns:
    ///   `id`, `description`, `file_urls`, `tags`, `created_at`;
    /// - `auth` hides nothing;
    /// - every other table hides `id`.
    fn default() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            "resources".to_string(),
            ["id", "description", "file_urls", "tags", "created_at"]
                .map(String::from)
                .to_vec(),
        );
        tables.insert("auth".to_string(), Vec::new());
        Self {
            tables,
            fallback: vec!["id".to_string()],
        }
    }
}

impl SanitizePolicy {
    /// Override (or add) the hidden set for one table.
    pub fn with_table<I, S>(mut self, table: &str, hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(table.to_string(), hidden.into_iter().map(Into::into).collect());
        self
    }

    /// The hidden columns for a table under this policy.
    pub fn hidden_for(&self, table: &str) -> &[String] {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback)
    }

    /// Drop hidden columns, preserving the order of the survivors.
    pub fn visible_columns(&self, table: &str, columns: &[String]) -> Vec<String> {
        let hidden = self.hidden_for(table);
        columns
            .iter()
            .filter(|c| !hidden.contains(*c))
            .cloned()
            .collect()
    }
}

/// Extract one cell per visible column, in column order.
///
/// Missing columns become `null`, so ragged rows in a heterogeneous table
/// still produce cell lists aligned with the header.
pub fn project_row(row: &Row, columns: &[String]) -> Vec<Value> {
    columns
        .iter()
        .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
