//! SQL-shaped statement → table-store call translation.
//!
//! A caller supplies statement text plus an ordered parameter list; the
//! translator classifies the text, extracts table/column/filter structure,
//! issues exactly one backend call, and normalizes the result into a
//! [`RowSet`]. It is a pure, stateless, per-call mapping: no retries, no
//! timeouts, no shared mutable state. Whatever policy the backend offers is
//! inherited unchanged.
//!
//! Parse failures never raise. A statement that cannot be translated is
//! logged and reported as an empty row set, so `execute` callers cannot
//! tell "nothing matched the statement" from "matched and found zero rows".
//! Callers that need the distinction use [`Translator::try_execute`], which
//! tags the two cases apart. Only backend failures surface as `Err`, and
//! they are re-thrown unchanged.

use serde_json::Value;
use tracing::{debug, warn};

use crate::stmt::{
    parse_statement, DeleteStatement, InsertStatement, SelectStatement, Statement,
    UpdateStatement,
};
use crate::store::{Row, RowSet, StoreError, TableStore};

/// Translation outcome, before the silent-fallback collapse.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The statement translated and the backend answered.
    Translated(RowSet),
    /// The statement did not match any translation pattern; the backend was
    /// never called.
    Unparsed,
}

/// Translates statements against a backend table-store.
pub struct Translator<S> {
    store: S,
}

impl<S: TableStore> Translator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute a statement, absorbing parse misses into an empty row set.
    ///
    /// This is the classic contract: `Ok` with zero rows covers both a
    /// legitimately empty result and a statement that never translated.
    pub async fn execute(&self, text: &str, params: &[Value]) -> Result<RowSet, StoreError> {
        match self.try_execute(text, params).await? {
            Outcome::Translated(rows) => Ok(rows),
            Outcome::Unparsed => {
                warn!(
                    statement = %text,
                    "statement did not match any translation pattern; returning empty row set"
                );
                Ok(RowSet::empty())
            }
        }
    }

    /// Execute a statement, keeping the parse-miss case distinguishable.
    pub async fn try_execute(
        &self,
        text: &str,
        params: &[Value],
    ) -> Result<Outcome, StoreError> {
        match parse_statement(text) {
            Statement::Insert(stmt) => self.run_insert(stmt, params).await,
            Statement::Select(stmt) => self.run_select(stmt, params).await,
            Statement::Update(stmt) => self.run_update(stmt, params).await,
            Statement::Delete(stmt) => self.run_delete(stmt, params).await,
            Statement::Unrecognized => Ok(Outcome::Unparsed),
        }
    }

    /// Columns zip against parameters by position; columns beyond the
    /// parameter count are absent from the record entirely, not null.
    async fn run_insert(
        &self,
        stmt: InsertStatement,
        params: &[Value],
    ) -> Result<Outcome, StoreError> {
        let mut record = Row::new();
        for (column, value) in stmt.columns.iter().zip(params) {
            record.insert(column.clone(), value.clone());
        }
        debug!(table = %stmt.table, columns = record.len(), "translated insert");
        let rows = self.store.from(&stmt.table).insert(vec![record]).fetch().await?;
        Ok(Outcome::Translated(rows.into()))
    }

    /// Filters apply only when parameters were supplied at all; a predicate
    /// whose position has no parameter is dropped silently.
    async fn run_select(
        &self,
        stmt: SelectStatement,
        params: &[Value],
    ) -> Result<Outcome, StoreError> {
        let mut query = self.store.from(&stmt.table).select("*");
        if !params.is_empty() {
            for pred in &stmt.predicates {
                if let Some(value) = params.get(pred.param) {
                    query = query.eq(&pred.column, value.clone());
                }
            }
        }
        debug!(table = %stmt.table, predicates = stmt.predicates.len(), "translated select");
        let rows = query.fetch().await?;
        Ok(Outcome::Translated(rows.into()))
    }

    /// Assignments bind by position; the filter binds by digit. A missing
    /// assignment parameter drops the assignment; a missing filter
    /// parameter drops the whole call — updating unfiltered would touch
    /// every row in the table.
    async fn run_update(
        &self,
        stmt: UpdateStatement,
        params: &[Value],
    ) -> Result<Outcome, StoreError> {
        let Some(pred) = stmt.where_clause.first() else {
            return Ok(Outcome::Unparsed);
        };
        let Some(filter_value) = params.get(pred.param) else {
            return Ok(Outcome::Unparsed);
        };

        let mut record = Row::new();
        for assign in &stmt.assignments {
            if let Some(value) = params.get(assign.param) {
                record.insert(assign.column.clone(), value.clone());
            }
        }

        debug!(table = %stmt.table, assignments = record.len(), "translated update");
        let rows = self
            .store
            .from(&stmt.table)
            .update(record)
            .eq(&pred.column, filter_value.clone())
            .fetch()
            .await?;
        Ok(Outcome::Translated(rows.into()))
    }

    async fn run_delete(
        &self,
        stmt: DeleteStatement,
        params: &[Value],
    ) -> Result<Outcome, StoreError> {
        let Some(pred) = stmt.where_clause.first() else {
            return Ok(Outcome::Unparsed);
        };
        let Some(value) = params.get(pred.param) else {
            return Ok(Outcome::Unparsed);
        };

        debug!(table = %stmt.table, column = %pred.column, "translated delete");
        let rows = self
            .store
            .from(&stmt.table)
            .delete()
            .eq(&pred.column, value.clone())
            .fetch()
            .await?;
        Ok(Outcome::Translated(rows.into()))
    }
}
