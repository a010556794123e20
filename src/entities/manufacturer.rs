//! Manufacturer rows

use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for manufacturers
pub const MANUFACTURERS: &str = "manufacturers";

/// Manufacturer, optionally flagged as a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_supplier: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{IdSource, UuidSource};

    #[test]
    fn test_manufacturer_optional_fields_default() {
        let json = format!(r#"{{"id":"{}","name":"Acme"}}"#, UuidSource.new_id());
        let m: Manufacturer = serde_json::from_str(&json).unwrap();
        assert_eq!(m.name, "Acme");
        assert!(m.contact.is_none());
        assert!(!m.is_supplier);
    }
}
