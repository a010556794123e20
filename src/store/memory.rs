//! In-memory catalog store
//!
//! Backs the test suite and offline experiments. Rows are stored in the
//! already-joined shape a projection would produce, so `select` only has to
//! honor filters and ordering. Insert failures can be injected per table to
//! exercise partial-commit behavior.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::store::query::{Filter, Select};
use crate::store::{CatalogStore, StoreError};

/// In-memory implementation of [`CatalogStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<String, Vec<Value>>>,
    fail_insert: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows (builder style)
    pub fn with_table(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables.borrow_mut().insert(table.to_string(), rows);
        self
    }

    /// Make the next insert into `table` fail with a store error
    pub fn fail_next_insert(&self, table: &str) {
        *self.fail_insert.borrow_mut() = Some(table.to_string());
    }

    /// Snapshot of a table's rows, for assertions
    pub fn rows_in(&self, table: &str) -> Vec<Value> {
        self.tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn field_as_string(row: &Value, column: &str) -> Option<String> {
        match row.get(column)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn matches(row: &Value, filter: &Filter) -> bool {
        match filter {
            Filter::Eq(column, value) => {
                Self::field_as_string(row, column).as_deref() == Some(value.as_str())
            }
            Filter::Contains(column, needle) => Self::field_as_string(row, column)
                .map(|field| field.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            Filter::In(column, values) => Self::field_as_string(row, column)
                .map(|field| values.iter().any(|v| *v == field))
                .unwrap_or(false),
        }
    }
}

impl CatalogStore for MemoryStore {
    fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.borrow();
        let mut rows: Vec<Value> = tables
            .get(query.table())
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters().iter().all(|f| Self::matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = query.order() {
            rows.sort_by(|a, b| {
                let left = Self::field_as_string(a, &order.column).unwrap_or_default();
                let right = Self::field_as_string(b, &order.column).unwrap_or_default();
                if order.ascending {
                    left.cmp(&right)
                } else {
                    right.cmp(&left)
                }
            });
        }

        Ok(rows)
    }

    fn insert(
        &self,
        table: &str,
        payload: Value,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        if self.fail_insert.borrow().as_deref() == Some(table) {
            self.fail_insert.borrow_mut().take();
            return Err(StoreError::Status {
                status: 500,
                op: "insert",
                table: table.to_string(),
                message: "injected failure".to_string(),
            });
        }

        let inserted: Vec<Value> = match payload {
            Value::Array(rows) => rows,
            single => vec![single],
        };

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(table.to_string()).or_default();
        rows.extend(inserted.iter().cloned());

        Ok(if returning.is_some() { inserted } else { Vec::new() })
    }

    fn update(&self, table: &str, filters: &[Filter], payload: Value) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut() {
                if filters.iter().all(|f| Self::matches(row, f)) {
                    if let (Value::Object(target), Value::Object(fields)) = (row, &payload) {
                        for (key, value) in fields {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut tables = self.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| !filters.iter().all(|f| Self::matches(row, f)));
        }
        Ok(())
    }
}
