//! In-memory table store.
//!
//! Backs the CLI runner and the test suite with the same observable
//! semantics as a hosted table backend: equality-only filters, inserts
//! that return the inserted rows, updates that merge a partial record into
//! every matching row, deletes that return what they removed.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde_json::Value;

use super::client::{Operation, TableRequest, TableStore};
use super::result::{Row, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    /// When set, the next request fails with this error instead of
    /// executing. Used to exercise backend-failure paths.
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `{table: [row, ...]}` seed data.
    pub fn from_seed(seed: HashMap<String, Vec<Row>>) -> Self {
        Self {
            tables: Mutex::new(seed),
            fail_next: Mutex::new(None),
        }
    }

    /// Load seed data from a JSON file shaped `{ "table": [ {...}, ... ] }`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
        let seed: HashMap<String, Vec<Row>> = serde_json::from_str(&content)
            .with_context(|| format!("Seed file is not a table/rows map: {}", path.display()))?;
        Ok(Self::from_seed(seed))
    }

    /// Seed one table, replacing any existing rows.
    pub fn set_table(&self, table: &str, rows: Vec<Row>) {
        self.tables.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Snapshot of a table's rows, for assertions.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next request fail with the given error.
    pub fn fail_next(&self, err: StoreError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn matches(row: &Row, filters: &[super::client::Filter]) -> bool {
        filters
            .iter()
            .all(|f| row.get(&f.column) == Some(&f.value))
    }
}

impl TableStore for MemoryStore {
    async fn execute(&self, request: TableRequest) -> Result<Vec<Row>, StoreError> {
        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }

        let mut tables = self.tables.lock().unwrap();
        match request.operation {
            Operation::Select { .. } => {
                let rows = tables
                    .get(&request.table)
                    .ok_or_else(|| StoreError::UnknownTable(request.table.clone()))?;
                Ok(rows
                    .iter()
                    .filter(|r| Self::matches(r, &request.filters))
                    .cloned()
                    .collect())
            }
            Operation::Insert { records } => {
                let rows = tables.entry(request.table).or_default();
                rows.extend(records.iter().cloned());
                Ok(records)
            }
            Operation::Update { record } => {
                let rows = tables
                    .get_mut(&request.table)
                    .ok_or_else(|| StoreError::UnknownTable(request.table.clone()))?;
                let mut affected = Vec::new();
                for row in rows.iter_mut() {
                    if Self::matches(row, &request.filters) {
                        for (k, v) in &record {
                            row.insert(k.clone(), v.clone());
                        }
                        affected.push(row.clone());
                    }
                }
                Ok(affected)
            }
            Operation::Delete => {
                let rows = tables
                    .get_mut(&request.table)
                    .ok_or_else(|| StoreError::UnknownTable(request.table.clone()))?;
                let mut removed = Vec::new();
                rows.retain(|row| {
                    if Self::matches(row, &request.filters) {
                        removed.push(row.clone());
                        false
                    } else {
                        true
                    }
                });
                Ok(removed)
            }
        }
    }
}

/// Convenience for building rows in seeds and tests.
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
