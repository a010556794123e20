//! Client for the hosted catalog data store
//!
//! The store owns all persistence and referential integrity; this module
//! only describes reads and writes and moves rows as JSON values. Callers
//! deserialize into the row shape their projection produces.

pub mod memory;
pub mod query;
pub mod rest;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use query::{Filter, Order, Select};
pub use rest::RestStore;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op} on '{table}' failed: {message}")]
    Transport {
        op: &'static str,
        table: String,
        message: String,
    },

    #[error("store returned status {status} for {op} on '{table}': {message}")]
    Status {
        status: u16,
        op: &'static str,
        table: String,
        message: String,
    },

    #[error("expected exactly one row from '{table}', got {count}")]
    NotSingular { table: String, count: usize },

    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Access to the hosted catalog store, one call per table operation
pub trait CatalogStore {
    /// Run a read query, returning raw rows
    fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError>;

    /// Insert a payload (object or array of objects). When `returning` is
    /// given, the inserted rows are projected back.
    fn insert(
        &self,
        table: &str,
        payload: Value,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Update all rows matching the filters with the payload's fields
    fn update(&self, table: &str, filters: &[Filter], payload: Value) -> Result<(), StoreError>;

    /// Delete all rows matching the filters
    fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError>;
}

/// Deserialize raw rows into a typed row struct
pub fn rows<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, StoreError> {
    values
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(StoreError::from))
        .collect()
}

/// Deserialize a result expected to hold exactly one row
pub fn single_row<T: DeserializeOwned>(table: &str, values: Vec<Value>) -> Result<T, StoreError> {
    let count = values.len();
    let mut iter = values.into_iter();
    match (iter.next(), count) {
        (Some(value), 1) => Ok(serde_json::from_value(value)?),
        _ => Err(StoreError::NotSingular {
            table: table.to_string(),
            count,
        }),
    }
}

/// A related row that the store may return as a single nested object or as
/// an array, depending on join cardinality. Normalize once, at the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Collapse to the first related row, if any
    pub fn into_one(self) -> Option<T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

/// Collapse an optional related field to zero-or-one row
pub fn related<T>(field: Option<OneOrMany<T>>) -> Option<T> {
    field.and_then(OneOrMany::into_one)
}
