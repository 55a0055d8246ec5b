use serde::Serialize;
use thiserror::Error;

/// A single result record: an open mapping from column name to value. The
/// schema is whatever the backend returns; nothing here is statically known.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The uniform result shape handed back for every statement kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RowSet {
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Zero rows. Also what the fallback path reports, so an empty set is
    /// indistinguishable from "nothing matched the statement" by design.
    pub fn empty() -> Self {
        Self { rows: vec![] }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Failures reported by the backend table-store. These are the only errors
/// the translator ever surfaces; it re-throws them unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("table {0:?} does not exist")]
    UnknownTable(String),
    /// A structured API failure (constraint violation, bad request, ...).
    #[error("{message}")]
    Api { code: String, message: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}
