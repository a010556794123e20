//! Category rows, the middle level between subdomains and articles

use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for categories
pub const CATEGORIES: &str = "categories";

/// Equipment category, child of a subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RowId,
    pub name: String,
    pub subdomain_id: RowId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{IdSource, UuidSource};

    #[test]
    fn test_category_roundtrip() {
        let category = Category {
            id: UuidSource.new_id(),
            name: "Switchgear".to_string(),
            subdomain_id: UuidSource.new_id(),
        };
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(category, serde_json::from_str::<Category>(&json).unwrap());
    }
}
