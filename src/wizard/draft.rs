//! The wizard's in-memory draft and its reducer
//!
//! All wizard state lives in an immutable [`Draft`]; every user action is a
//! [`WizardEvent`] applied through the pure [`apply`] function. The cursor
//! indexes the *effective* step list for the chosen project type, so
//! back-navigation can never land on a step irrelevant to the branch taken.

use std::collections::BTreeMap;

use crate::core::identity::RowId;
use crate::entities::contractor::Contractor;
use crate::entities::domain::{Domain, Subdomain};
use crate::entities::project::ProjectType;
use crate::wizard::steps::{steps_for, StepId};

/// Subdomain choice enriched with its parent domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainChoice {
    pub domain: Domain,
    pub subdomain: Subdomain,
}

/// One selected article, carrying the category name used for grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleChoice {
    pub id: RowId,
    pub name: String,
    pub category_name: Option<String>,
}

/// One manufacturer+certification combination registered for an article
/// under a reference key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerOption {
    pub manufacturer_id: RowId,
    pub name: String,
    pub reference: String,
    pub certified: bool,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Per-article supplier assignment: the reference is chosen first, then a
/// manufacturer restricted to that reference's option set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub reference: String,
    pub manufacturer_id: Option<RowId>,
}

/// Everything the wizard has accumulated but not yet committed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    cursor: usize,
    pub scope: Option<SubdomainChoice>,
    pub project_type: Option<ProjectType>,
    pub agreement_type: Option<String>,
    pub contractor: Option<Contractor>,
    pub articles: Vec<ArticleChoice>,
    pub assignments: BTreeMap<RowId, Assignment>,
    pub options: BTreeMap<RowId, Vec<ManufacturerOption>>,
}

/// A user or load action the reducer folds into the draft
#[derive(Debug, Clone)]
pub enum WizardEvent {
    ScopeChosen(SubdomainChoice),
    ProjectTypeChosen(ProjectType),
    AgreementChosen(String),
    ContractorChosen(Contractor),
    EquipmentChosen(Vec<ArticleChoice>),
    OptionsLoaded(BTreeMap<RowId, Vec<ManufacturerOption>>),
    ReferenceChosen { article: RowId, reference: String },
    ManufacturerChosen { article: RowId, manufacturer: RowId },
    AssignmentsConfirmed,
    Back,
    Reset,
}

/// Fold one event into the draft, producing the next draft
pub fn apply(mut draft: Draft, event: WizardEvent) -> Draft {
    match event {
        WizardEvent::ScopeChosen(scope) => {
            draft.scope = Some(scope);
            draft.cursor = draft.index_of(StepId::ProjectType);
        }
        WizardEvent::ProjectTypeChosen(project_type) => {
            draft.project_type = Some(project_type);
            draft.cursor = draft.index_of(StepId::Agreement);
        }
        WizardEvent::AgreementChosen(agreement_type) => {
            draft.agreement_type = Some(agreement_type);
            // Next effective step is Contractor or Equipment depending on
            // the branch taken at the project-type step.
            draft.cursor = draft.index_of(StepId::Agreement) + 1;
        }
        WizardEvent::ContractorChosen(contractor) => {
            draft.contractor = Some(contractor);
            draft.cursor = draft.index_of(StepId::Summary);
        }
        WizardEvent::EquipmentChosen(articles) => {
            // Drop stale per-article state for articles no longer selected.
            draft
                .assignments
                .retain(|id, _| articles.iter().any(|a| a.id == *id));
            draft.options.retain(|id, _| articles.iter().any(|a| a.id == *id));
            draft.articles = articles;
            draft.cursor = draft.index_of(StepId::Suppliers);
        }
        WizardEvent::OptionsLoaded(options) => {
            draft.options = options;
        }
        WizardEvent::ReferenceChosen { article, reference } => {
            // A new reference invalidates any previously chosen manufacturer.
            draft.assignments.insert(
                article,
                Assignment {
                    reference,
                    manufacturer_id: None,
                },
            );
        }
        WizardEvent::ManufacturerChosen { article, manufacturer } => {
            if let Some(assignment) = draft.assignments.get_mut(&article) {
                assignment.manufacturer_id = Some(manufacturer);
            }
        }
        WizardEvent::AssignmentsConfirmed => {
            if draft.suppliers_complete() {
                draft.cursor = draft.index_of(StepId::Summary);
            }
        }
        WizardEvent::Back => {
            draft.cursor = draft.cursor.saturating_sub(1);
        }
        WizardEvent::Reset => {
            draft = Draft::default();
        }
    }
    draft
}

impl Draft {
    /// The effective step sequence for the current project type
    pub fn steps(&self) -> Vec<StepId> {
        steps_for(self.project_type)
    }

    /// The step the wizard is currently on
    pub fn current_step(&self) -> StepId {
        let steps = self.steps();
        steps[self.cursor.min(steps.len() - 1)]
    }

    /// Display label like "Step 3 of 5: Agreement Type", recomputed on
    /// every transition since the step list itself can change
    pub fn step_label(&self) -> String {
        let steps = self.steps();
        let index = self.cursor.min(steps.len() - 1);
        format!("Step {} of {}: {}", index + 1, steps.len(), steps[index].title())
    }

    fn index_of(&self, step: StepId) -> usize {
        self.steps().iter().position(|s| *s == step).unwrap_or(0)
    }

    /// True when some selected article has no loaded supplier options,
    /// so the options map must be (re)fetched before assignment. Going
    /// back and adding an article leaves retained entries for the kept
    /// ones, so an emptiness check would serve stale data here.
    pub fn needs_supplier_options(&self) -> bool {
        self.articles
            .iter()
            .any(|article| !self.options.contains_key(&article.id))
    }

    /// True when every selected article has a manufacturer assigned
    pub fn suppliers_complete(&self) -> bool {
        self.articles.iter().all(|article| {
            self.assignments
                .get(&article.id)
                .map(|a| a.manufacturer_id.is_some())
                .unwrap_or(false)
        })
    }

    /// Articles still missing a manufacturer assignment
    pub fn unassigned_articles(&self) -> Vec<&ArticleChoice> {
        self.articles
            .iter()
            .filter(|article| {
                self.assignments
                    .get(&article.id)
                    .map(|a| a.manufacturer_id.is_none())
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Distinct references registered for an article, in first-seen order
    pub fn references_for(&self, article: RowId) -> Vec<String> {
        let mut references = Vec::new();
        for option in self.options.get(&article).map(Vec::as_slice).unwrap_or(&[]) {
            if !references.contains(&option.reference) {
                references.push(option.reference.clone());
            }
        }
        references
    }

    /// Manufacturer options for an article restricted to one reference
    pub fn manufacturers_for(&self, article: RowId, reference: &str) -> Vec<&ManufacturerOption> {
        self.options
            .get(&article)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter(|option| option.reference == reference)
            .collect()
    }

    /// Look up the option record behind an assignment (for the
    /// certification flag and supplier contact details)
    pub fn option_for(&self, article: RowId, manufacturer: RowId) -> Option<&ManufacturerOption> {
        self.options
            .get(&article)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .find(|option| option.manufacturer_id == manufacturer)
    }

    /// Derived project name: domain, subdomain, agreement, and contractor
    /// name or a generic equipment label, joined with a fixed separator
    pub fn project_name(&self) -> Option<String> {
        let scope = self.scope.as_ref()?;
        let agreement = self.agreement_type.as_deref()?;
        let tail = match self.project_type? {
            ProjectType::Contractor => self.contractor.as_ref()?.name.clone(),
            ProjectType::Supplier => "Equipment Project".to_string(),
        };
        Some(format!(
            "{} - {} - {} - {}",
            scope.domain.name, scope.subdomain.name, agreement, tail
        ))
    }

    /// Summary statistics over the current draft
    pub fn stats(&self) -> DraftStats {
        let assigned = self
            .assignments
            .values()
            .filter(|a| a.manufacturer_id.is_some())
            .count();
        let mut suppliers: Vec<RowId> = self
            .assignments
            .values()
            .filter_map(|a| a.manufacturer_id)
            .collect();
        suppliers.sort();
        suppliers.dedup();
        let mut categories: Vec<&str> = self
            .articles
            .iter()
            .filter_map(|a| a.category_name.as_deref())
            .collect();
        categories.sort();
        categories.dedup();

        let rate = if self.articles.is_empty() {
            0
        } else {
            ((assigned as f64 / self.articles.len() as f64) * 100.0).round() as u32
        };

        DraftStats {
            equipment_count: self.articles.len(),
            assigned_count: assigned,
            distinct_suppliers: suppliers.len(),
            distinct_categories: categories.len(),
            assignment_rate: rate,
        }
    }
}

/// Aggregate numbers shown on the summary step and in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftStats {
    pub equipment_count: usize,
    pub assigned_count: usize,
    pub distinct_suppliers: usize,
    pub distinct_categories: usize,
    /// round(assigned / total * 100), 0 when no equipment selected
    pub assignment_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{IdSource, UuidSource};

    fn scope() -> SubdomainChoice {
        let domain = Domain {
            id: UuidSource.new_id(),
            name: "Electrical".to_string(),
        };
        SubdomainChoice {
            subdomain: Subdomain {
                id: UuidSource.new_id(),
                name: "Transformers".to_string(),
                domain_id: domain.id,
            },
            domain,
        }
    }

    fn contractor(name: &str) -> Contractor {
        Contractor {
            id: UuidSource.new_id(),
            name: name.to_string(),
            sigle: None,
            address: None,
            phone: None,
            fax: None,
            country: None,
        }
    }

    fn article(name: &str, category: &str) -> ArticleChoice {
        ArticleChoice {
            id: UuidSource.new_id(),
            name: name.to_string(),
            category_name: Some(category.to_string()),
        }
    }

    fn option_for(manufacturer: RowId, reference: &str, certified: bool) -> ManufacturerOption {
        ManufacturerOption {
            manufacturer_id: manufacturer,
            name: "Maker".to_string(),
            reference: reference.to_string(),
            certified,
            contact: None,
            phone: None,
            email: None,
        }
    }

    fn contractor_draft_at_summary() -> Draft {
        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Contractor));
        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        draft = apply(draft, WizardEvent::ContractorChosen(contractor("Acme Corp")));
        draft
    }

    #[test]
    fn test_forward_walk_contractor_path() {
        let mut draft = Draft::default();
        assert_eq!(draft.current_step(), StepId::Domain);
        assert_eq!(draft.step_label(), "Step 1 of 7: Domain/Subdomain");

        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        assert_eq!(draft.current_step(), StepId::ProjectType);

        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Contractor));
        assert_eq!(draft.current_step(), StepId::Agreement);
        assert_eq!(draft.step_label(), "Step 3 of 5: Agreement Type");

        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        assert_eq!(draft.current_step(), StepId::Contractor);

        draft = apply(draft, WizardEvent::ContractorChosen(contractor("Acme Corp")));
        assert_eq!(draft.current_step(), StepId::Summary);
        assert_eq!(draft.step_label(), "Step 5 of 5: Project Details");
    }

    #[test]
    fn test_back_from_summary_respects_contractor_branch() {
        let mut draft = contractor_draft_at_summary();
        draft = apply(draft, WizardEvent::Back);
        assert_eq!(draft.current_step(), StepId::Contractor);
    }

    #[test]
    fn test_back_saturates_at_first_step() {
        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::Back);
        assert_eq!(draft.current_step(), StepId::Domain);
    }

    #[test]
    fn test_agreement_advances_to_equipment_on_supplier_branch() {
        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        assert_eq!(draft.current_step(), StepId::Equipment);
        assert_eq!(draft.step_label(), "Step 4 of 6: Equipment");
    }

    #[test]
    fn test_reference_clears_manufacturer() {
        let article = article("Breaker", "Switchgear");
        let manufacturer = UuidSource.new_id();
        let mut draft = Draft {
            articles: vec![article.clone()],
            ..Draft::default()
        };
        draft = apply(
            draft,
            WizardEvent::ReferenceChosen {
                article: article.id,
                reference: "REF-1".to_string(),
            },
        );
        draft = apply(
            draft,
            WizardEvent::ManufacturerChosen {
                article: article.id,
                manufacturer,
            },
        );
        assert_eq!(
            draft.assignments[&article.id].manufacturer_id,
            Some(manufacturer)
        );

        draft = apply(
            draft,
            WizardEvent::ReferenceChosen {
                article: article.id,
                reference: "REF-2".to_string(),
            },
        );
        assert_eq!(draft.assignments[&article.id].reference, "REF-2");
        assert_eq!(draft.assignments[&article.id].manufacturer_id, None);
    }

    #[test]
    fn test_confirm_blocked_until_every_article_assigned() {
        let first = article("Breaker", "Switchgear");
        let second = article("Relay", "Protection");
        let manufacturer = UuidSource.new_id();

        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        draft = apply(
            draft,
            WizardEvent::EquipmentChosen(vec![first.clone(), second.clone()]),
        );
        draft = apply(
            draft,
            WizardEvent::ReferenceChosen {
                article: first.id,
                reference: "REF-1".to_string(),
            },
        );
        draft = apply(
            draft,
            WizardEvent::ManufacturerChosen {
                article: first.id,
                manufacturer,
            },
        );

        // Second article unassigned: the transition must not happen.
        draft = apply(draft, WizardEvent::AssignmentsConfirmed);
        assert_eq!(draft.current_step(), StepId::Suppliers);
        assert_eq!(draft.unassigned_articles().len(), 1);

        draft = apply(
            draft,
            WizardEvent::ReferenceChosen {
                article: second.id,
                reference: "REF-9".to_string(),
            },
        );
        draft = apply(
            draft,
            WizardEvent::ManufacturerChosen {
                article: second.id,
                manufacturer,
            },
        );
        draft = apply(draft, WizardEvent::AssignmentsConfirmed);
        assert_eq!(draft.current_step(), StepId::Summary);
    }

    #[test]
    fn test_reselecting_equipment_drops_stale_assignments() {
        let kept = article("Breaker", "Switchgear");
        let dropped = article("Relay", "Protection");
        let manufacturer = UuidSource.new_id();

        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(
            draft,
            WizardEvent::EquipmentChosen(vec![kept.clone(), dropped.clone()]),
        );
        draft = apply(
            draft,
            WizardEvent::ReferenceChosen {
                article: dropped.id,
                reference: "REF-1".to_string(),
            },
        );
        draft = apply(
            draft,
            WizardEvent::ManufacturerChosen {
                article: dropped.id,
                manufacturer,
            },
        );

        draft = apply(draft, WizardEvent::EquipmentChosen(vec![kept.clone()]));
        assert!(draft.assignments.is_empty());
        assert_eq!(draft.articles.len(), 1);
    }

    #[test]
    fn test_derived_project_name_contractor() {
        let draft = contractor_draft_at_summary();
        assert_eq!(
            draft.project_name().unwrap(),
            "Electrical - Transformers - Framework - Acme Corp"
        );
    }

    #[test]
    fn test_derived_project_name_supplier() {
        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        assert_eq!(
            draft.project_name().unwrap(),
            "Electrical - Transformers - Framework - Equipment Project"
        );
    }

    #[test]
    fn test_assignment_rate_rounds() {
        let articles: Vec<ArticleChoice> = (0..4)
            .map(|i| article(&format!("Item {}", i), "Switchgear"))
            .collect();
        let manufacturer = UuidSource.new_id();

        let mut draft = Draft {
            articles: articles.clone(),
            ..Draft::default()
        };
        for item in articles.iter().take(3) {
            draft = apply(
                draft,
                WizardEvent::ReferenceChosen {
                    article: item.id,
                    reference: "REF".to_string(),
                },
            );
            draft = apply(
                draft,
                WizardEvent::ManufacturerChosen {
                    article: item.id,
                    manufacturer,
                },
            );
        }

        let stats = draft.stats();
        assert_eq!(stats.equipment_count, 4);
        assert_eq!(stats.assigned_count, 3);
        assert_eq!(stats.distinct_suppliers, 1);
        assert_eq!(stats.distinct_categories, 1);
        assert_eq!(stats.assignment_rate, 75);
    }

    #[test]
    fn test_assignment_rate_zero_without_equipment() {
        assert_eq!(Draft::default().stats().assignment_rate, 0);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let draft = apply(contractor_draft_at_summary(), WizardEvent::Reset);
        assert_eq!(draft, Draft::default());
        assert_eq!(draft.current_step(), StepId::Domain);
    }

    #[test]
    fn test_options_refetch_needed_after_adding_article() {
        let first = article("Breaker", "Switchgear");
        let second = article("Relay", "Protection");
        let manufacturer = UuidSource.new_id();

        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(draft, WizardEvent::EquipmentChosen(vec![first.clone()]));

        let mut options = BTreeMap::new();
        options.insert(first.id, vec![option_for(manufacturer, "REF-1", false)]);
        draft = apply(draft, WizardEvent::OptionsLoaded(options));
        assert!(!draft.needs_supplier_options());

        // Back to equipment, keep the first article and add a second: the
        // retained entry keeps the map non-empty, but the new article has
        // no options yet and must trigger a refetch.
        draft = apply(
            draft,
            WizardEvent::EquipmentChosen(vec![first.clone(), second.clone()]),
        );
        assert!(!draft.options.is_empty());
        assert!(draft.references_for(second.id).is_empty());
        assert!(draft.needs_supplier_options());

        let mut options = BTreeMap::new();
        options.insert(first.id, vec![option_for(manufacturer, "REF-1", false)]);
        options.insert(second.id, vec![option_for(manufacturer, "REF-2", false)]);
        draft = apply(draft, WizardEvent::OptionsLoaded(options));
        assert!(!draft.needs_supplier_options());
        assert_eq!(draft.references_for(second.id), vec!["REF-2".to_string()]);
    }

    #[test]
    fn test_no_options_fetch_needed_without_equipment() {
        assert!(!Draft::default().needs_supplier_options());
    }

    #[test]
    fn test_option_lookup_by_article_and_manufacturer() {
        let item = article("Breaker", "Switchgear");
        let manufacturer = UuidSource.new_id();
        let mut options = BTreeMap::new();
        options.insert(item.id, vec![option_for(manufacturer, "REF-1", true)]);

        let mut draft = Draft {
            articles: vec![item.clone()],
            ..Draft::default()
        };
        draft = apply(draft, WizardEvent::OptionsLoaded(options));

        assert!(draft.option_for(item.id, manufacturer).unwrap().certified);
        assert_eq!(draft.references_for(item.id), vec!["REF-1".to_string()]);
        assert_eq!(draft.manufacturers_for(item.id, "REF-1").len(), 1);
        assert!(draft.manufacturers_for(item.id, "REF-2").is_empty());
    }
}
