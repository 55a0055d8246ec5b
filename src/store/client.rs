//! The table-store seam.
//!
//! Backends expose structured table operations only — select, insert,
//! update, delete, plus equality filters. A [`TableStore`] implements one
//! `execute` entry point; the builder chain
//! (`store.from(table).select("*").eq(col, value).fetch()`) just
//! accumulates a [`TableRequest`] and hands it over. All I/O, retry, and
//! timeout policy belongs to the store implementation.

use serde_json::Value;

use super::result::{Row, StoreError};

/// One structured backend operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRequest {
    pub table: String,
    pub operation: Operation,
    /// Equality filters, applied conjunctively. The only filter shape this
    /// backend understands.
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Column projection is passed through verbatim; `"*"` means all.
    Select { columns: String },
    Insert { records: Vec<Row> },
    /// Partial record; unmentioned columns are left untouched.
    Update { record: Row },
    Delete,
}

/// `column == value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// A backend capable of executing [`TableRequest`]s. Every operation
/// resolves to either the affected rows or a [`StoreError`]; mutating
/// operations return the rows they touched.
pub trait TableStore {
    fn execute(
        &self,
        request: TableRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Row>, StoreError>> + Send;

    /// Entry point of the builder chain.
    fn from(&self, table: &str) -> TableRef<'_, Self>
    where
        Self: Sized,
    {
        TableRef {
            store: self,
            table: table.to_string(),
        }
    }
}

/// A table pinned to a store, waiting for an operation.
pub struct TableRef<'a, S> {
    store: &'a S,
    table: String,
}

impl<'a, S: TableStore> TableRef<'a, S> {
    pub fn select(self, columns: &str) -> QueryBuilder<'a, S> {
        self.build(Operation::Select {
            columns: columns.to_string(),
        })
    }

    pub fn insert(self, records: Vec<Row>) -> QueryBuilder<'a, S> {
        self.build(Operation::Insert { records })
    }

    pub fn update(self, record: Row) -> QueryBuilder<'a, S> {
        self.build(Operation::Update { record })
    }

    pub fn delete(self) -> QueryBuilder<'a, S> {
        self.build(Operation::Delete)
    }

    fn build(self, operation: Operation) -> QueryBuilder<'a, S> {
        QueryBuilder {
            store: self.store,
            request: TableRequest {
                table: self.table,
                operation,
                filters: vec![],
            },
        }
    }
}

/// An accumulated request. `fetch` is the single suspension point: exactly
/// one backend round-trip per builder.
pub struct QueryBuilder<'a, S> {
    store: &'a S,
    request: TableRequest,
}

impl<S: TableStore> QueryBuilder<'_, S> {
    /// Add an equality filter.
    pub fn eq(mut self, column: &str, value: Value) -> Self {
        self.request.filters.push(Filter {
            column: column.to_string(),
            value,
        });
        self
    }

    pub async fn fetch(self) -> Result<Vec<Row>, StoreError> {
        self.store.execute(self.request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the request instead of executing it.
    struct Recorder {
        seen: Mutex<Option<TableRequest>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                seen: Mutex::new(None),
            }
        }
    }

    impl TableStore for Recorder {
        async fn execute(&self, request: TableRequest) -> Result<Vec<Row>, StoreError> {
            *self.seen.lock().unwrap() = Some(request);
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_builder_accumulates_select_request() {
        let store = Recorder::new();
        store
            .from("users")
            .select("*")
            .eq("id", json!(7))
            .eq("org", json!("acme"))
            .fetch()
            .await
            .unwrap();

        let req = store.seen.lock().unwrap().take().unwrap();
        assert_eq!(req.table, "users");
        assert_eq!(
            req.operation,
            Operation::Select {
                columns: "*".into()
            }
        );
        assert_eq!(req.filters.len(), 2);
        assert_eq!(req.filters[0].column, "id");
        assert_eq!(req.filters[0].value, json!(7));
    }

    #[tokio::test]
    async fn test_builder_delete_request() {
        let store = Recorder::new();
        store
            .from("sessions")
            .delete()
            .eq("id", json!(1))
            .fetch()
            .await
            .unwrap();

        let req = store.seen.lock().unwrap().take().unwrap();
        assert_eq!(req.operation, Operation::Delete);
        assert_eq!(req.filters.len(), 1);
    }
}
