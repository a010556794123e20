//! Step catalog for the project creation wizard
//!
//! The effective step sequence is not static: it is derived from a master
//! catalog by the project type chosen at step two. Until a type is chosen
//! the unfiltered catalog is shown.

use crate::entities::project::ProjectType;

/// Identity of one wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Domain,
    ProjectType,
    Agreement,
    Contractor,
    Equipment,
    Suppliers,
    Summary,
}

impl StepId {
    /// Human-readable step title
    pub fn title(&self) -> &'static str {
        match self {
            StepId::Domain => "Domain/Subdomain",
            StepId::ProjectType => "Project Type",
            StepId::Agreement => "Agreement Type",
            StepId::Contractor => "Contractor",
            StepId::Equipment => "Equipment",
            StepId::Suppliers => "Suppliers",
            StepId::Summary => "Project Details",
        }
    }
}

/// The master step catalog, before any project-type filtering
pub const MASTER_STEPS: [StepId; 7] = [
    StepId::Domain,
    StepId::ProjectType,
    StepId::Agreement,
    StepId::Contractor,
    StepId::Equipment,
    StepId::Suppliers,
    StepId::Summary,
];

/// Compute the effective step sequence for a project type
pub fn steps_for(project_type: Option<ProjectType>) -> Vec<StepId> {
    match project_type {
        None => MASTER_STEPS.to_vec(),
        Some(ProjectType::Contractor) => vec![
            StepId::Domain,
            StepId::ProjectType,
            StepId::Agreement,
            StepId::Contractor,
            StepId::Summary,
        ],
        Some(ProjectType::Supplier) => vec![
            StepId::Domain,
            StepId::ProjectType,
            StepId::Agreement,
            StepId::Equipment,
            StepId::Suppliers,
            StepId::Summary,
        ],
    }
}
