//! Contractor rows and their typed, dated agreements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for contractors
pub const CONTRACTORS: &str = "contractors";

/// Table name for contractor agreements
pub const CONTRACTOR_AGREEMENTS: &str = "contractor_agreements";

/// Contractor company record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub sigle: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fax: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Typed, dated agreement linking a contractor to a subdomain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorAgreement {
    pub id: RowId,
    pub contractor_id: RowId,
    /// Free-text agreement label; drives the wizard's agreement choices
    #[serde(rename = "type")]
    pub agreement_type: String,
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
    pub subdomain_id: RowId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{IdSource, UuidSource};

    #[test]
    fn test_agreement_type_serializes_as_type() {
        let agreement = ContractorAgreement {
            id: UuidSource.new_id(),
            contractor_id: UuidSource.new_id(),
            agreement_type: "Framework".to_string(),
            date_start: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_end: NaiveDate::from_ymd_opt(2025, 1, 1),
            subdomain_id: UuidSource.new_id(),
        };
        let json = serde_json::to_value(&agreement).unwrap();
        assert_eq!(json["type"], "Framework");
        assert!(json.get("agreement_type").is_none());
    }
}
