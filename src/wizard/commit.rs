//! Final commit of a wizard draft
//!
//! The commit is the only write path in the wizard: one project row, then
//! (on the supplier path) one bulk insert of equipment rows. The two writes
//! are not atomic against a REST store, so an equipment failure after a
//! successful project insert is reported as its own error variant and the
//! draft is left untouched for a retry.

use chrono::Utc;

use crate::core::identity::{IdSource, RowId};
use crate::entities::project::{
    Project, ProjectEquipment, ProjectStatus, ProjectType, PROJECTS, PROJECT_EQUIPMENT,
};
use crate::store::{CatalogStore, StoreError};
use crate::wizard::draft::Draft;

/// What a successful commit produced
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub project_id: RowId,
    pub name: String,
    pub equipment_count: usize,
}

/// Why a commit was refused or failed
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// The draft is missing data a finished project requires
    #[error("cannot finish project: {0}")]
    Incomplete(&'static str),

    /// The project insert itself failed; nothing was written
    #[error("failed to create project")]
    Project(#[source] StoreError),

    /// The project row exists but its equipment rows do not
    #[error("project created but equipment data failed to save (project {project_id})")]
    Equipment {
        project_id: RowId,
        #[source]
        source: StoreError,
    },
}

/// Validate the draft and write it to the store
pub fn commit(
    store: &dyn CatalogStore,
    ids: &dyn IdSource,
    draft: &Draft,
) -> Result<CommitOutcome, CommitError> {
    let scope = draft
        .scope
        .as_ref()
        .ok_or(CommitError::Incomplete("no domain and subdomain selected"))?;
    let project_type = draft
        .project_type
        .ok_or(CommitError::Incomplete("no project type selected"))?;
    let agreement_type = draft
        .agreement_type
        .clone()
        .ok_or(CommitError::Incomplete("no agreement type selected"))?;
    let name = draft
        .project_name()
        .ok_or(CommitError::Incomplete("project name could not be derived"))?;

    let contractor_id = match project_type {
        ProjectType::Contractor => Some(
            draft
                .contractor
                .as_ref()
                .ok_or(CommitError::Incomplete("no contractor selected"))?
                .id,
        ),
        ProjectType::Supplier => {
            if draft.articles.is_empty() {
                return Err(CommitError::Incomplete("no equipment selected"));
            }
            if !draft.suppliers_complete() {
                return Err(CommitError::Incomplete(
                    "every article needs a supplier assigned",
                ));
            }
            None
        }
    };

    let project = Project {
        id: ids.new_id(),
        name: name.clone(),
        domain_id: scope.domain.id,
        subdomain_id: scope.subdomain.id,
        agreement_type,
        contractor_id,
        project_type,
        status: ProjectStatus::Active,
        created_at: Some(Utc::now()),
    };

    let payload = serde_json::to_value(&project)
        .map_err(|e| CommitError::Project(StoreError::Decode(e)))?;
    store
        .insert(PROJECTS, payload, None)
        .map_err(CommitError::Project)?;

    let mut equipment_count = 0;
    if project_type == ProjectType::Supplier {
        let rows: Vec<ProjectEquipment> = draft
            .articles
            .iter()
            .filter_map(|article| {
                let assignment = draft.assignments.get(&article.id)?;
                let manufacturer_id = assignment.manufacturer_id?;
                // The certification flag lives on the option record, not on
                // the assignment; missing options resolve to uncertified.
                let certified = draft
                    .option_for(article.id, manufacturer_id)
                    .map(|option| option.certified)
                    .unwrap_or(false);
                Some(ProjectEquipment {
                    id: ids.new_id(),
                    project_id: project.id,
                    article_id: article.id,
                    manufacturer_id,
                    reference: Some(assignment.reference.clone()),
                    certified_by_onee: certified,
                })
            })
            .collect();
        equipment_count = rows.len();

        let payload = serde_json::to_value(&rows).map_err(|e| CommitError::Equipment {
            project_id: project.id,
            source: StoreError::Decode(e),
        })?;
        store
            .insert(PROJECT_EQUIPMENT, payload, None)
            .map_err(|source| CommitError::Equipment {
                project_id: project.id,
                source,
            })?;
    }

    Ok(CommitOutcome {
        project_id: project.id,
        name,
        equipment_count,
    })
}
