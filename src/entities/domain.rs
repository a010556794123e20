//! Domain and subdomain rows

use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for domains
pub const DOMAINS: &str = "domains";

/// Table name for subdomains
pub const SUBDOMAINS: &str = "subdomains";

/// Top-level catalog domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: RowId,
    pub name: String,
}

/// Subdomain, child of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    pub id: RowId,
    pub name: String,
    pub domain_id: RowId,
}
