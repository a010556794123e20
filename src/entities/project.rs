//! Project rows - the output of the creation wizard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for projects
pub const PROJECTS: &str = "projects";

/// Table name for project equipment assignments
pub const PROJECT_EQUIPMENT: &str = "project_equipment";

/// Project kind, chosen once per wizard session; determines the remaining
/// step sequence and the shape of the final commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Contractor,
    Supplier,
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectType::Contractor => write!(f, "contractor"),
            ProjectType::Supplier => write!(f, "supplier"),
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contractor" => Ok(ProjectType::Contractor),
            "supplier" => Ok(ProjectType::Supplier),
            _ => Err(format!("Unknown project type: {}", s)),
        }
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    /// Initial status for freshly committed projects
    #[default]
    Active,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Pending => write!(f, "pending"),
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ProjectStatus::Pending),
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// Root row of a committed project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RowId,
    pub name: String,
    pub domain_id: RowId,
    pub subdomain_id: RowId,
    pub agreement_type: String,
    /// Set only when project_type is contractor
    #[serde(default)]
    pub contractor_id: Option<RowId>,
    pub project_type: ProjectType,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Join row recording which manufacturer/reference fulfills which article
/// for a supplier project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEquipment {
    pub id: RowId,
    pub project_id: RowId,
    pub article_id: RowId,
    pub manufacturer_id: RowId,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub certified_by_onee: bool,
}
