//! Row identity for store-backed entities
//!
//! Every row the toolkit writes carries a client-generated UUID because the
//! hosted store does not always default one. Generation goes through a single
//! injected capability (`IdSource`) so commit logic stays testable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// A UUID-keyed row identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(Uuid);

impl RowId {
    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a RowId from its canonical hyphenated form
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    /// First 8 hex characters, for compact display in tables
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RowId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::parse_str(s).map_err(|e| IdParseError::InvalidUuid(s.to_string(), e.to_string()))?;
        Ok(Self(uuid))
    }
}

/// Errors that can occur when parsing row IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid UUID '{0}': {1}")]
    InvalidUuid(String, String),
}

/// Source of fresh row identifiers
pub trait IdSource {
    /// Produce a new unique row id
    fn new_id(&self) -> RowId;
}

/// Standard UUID v4 generator
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn new_id(&self) -> RowId {
        RowId(Uuid::new_v4())
    }
}
