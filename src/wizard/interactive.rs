//! Interactive front end of the project creation wizard
//!
//! Drives the step selectors in sequence, folding every answer into the
//! draft through the reducer. All store reads happen here at the step that
//! needs them; failures are reported naming the action and the user stays
//! on the current step.

use chrono::Utc;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::identity::IdSource;
use crate::entities::project::ProjectType;
use crate::render::{build_summary, document_filename, DocumentRenderer, PlainRenderer, FILENAME_PREFIX};
use crate::render::draw::PAGE_WIDTH;
use crate::store::CatalogStore;
use crate::wizard::commit::{commit, CommitError};
use crate::wizard::draft::{apply, ArticleChoice, Draft, ManufacturerOption, SubdomainChoice, WizardEvent};
use crate::wizard::selectors;
use crate::wizard::steps::StepId;

/// How one pass through the wizard ended
enum Outcome {
    Committed,
    Abandoned,
}

/// One interactive wizard session over a store
pub struct WizardSession<'a> {
    store: &'a dyn CatalogStore,
    ids: &'a dyn IdSource,
    theme: ColorfulTheme,
}

impl<'a> WizardSession<'a> {
    pub fn new(store: &'a dyn CatalogStore, ids: &'a dyn IdSource) -> Self {
        Self {
            store,
            ids,
            theme: ColorfulTheme::default(),
        }
    }

    /// Run wizard passes until the user declines to start another project
    pub fn run(&self) -> Result<()> {
        loop {
            match self.run_draft()? {
                Outcome::Abandoned => return Ok(()),
                Outcome::Committed => {
                    let again = Confirm::with_theme(&self.theme)
                        .with_prompt("Start another project?")
                        .default(false)
                        .interact()
                        .into_diagnostic()?;
                    if !again {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn run_draft(&self) -> Result<Outcome> {
        let mut draft = Draft::default();
        loop {
            self.banner(&draft);
            let step = draft.current_step();
            let event = match step {
                StepId::Domain => self.step_domain()?,
                StepId::ProjectType => self.step_project_type()?,
                StepId::Agreement => self.step_agreement(&draft)?,
                StepId::Contractor => self.step_contractor(&draft)?,
                StepId::Equipment => self.step_equipment(&draft)?,
                StepId::Suppliers => self.step_suppliers(&mut draft)?,
                StepId::Summary => match self.step_summary(&draft)? {
                    Some(event) => event,
                    None => return Ok(Outcome::Committed),
                },
            };
            match event {
                Some(event) => draft = apply(draft, event),
                None => return Ok(Outcome::Abandoned),
            }
        }
    }

    fn banner(&self, draft: &Draft) {
        println!();
        println!("{} {}", style("◆").cyan(), style(draft.step_label()).bold());
        println!("{}", style("─".repeat(50)).dim());
    }

    fn warn(&self, message: &str) {
        println!("{} {}", style("!").yellow(), message);
    }

    fn fail(&self, action: &str, error: impl std::fmt::Display) {
        println!("{} {}: {}", style("✗").red(), action, error);
    }

    /// Ask whether to retry after a failed load; declining abandons the
    /// wizard
    fn retry(&self) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Retry?")
            .default(true)
            .interact()
            .into_diagnostic()
    }

    /// `None` means the user chose the explicit Back item
    fn select_with_back(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        let mut menu = items.to_vec();
        menu.push("Back".to_string());
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&menu)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok((choice < items.len()).then_some(choice))
    }

    fn step_domain(&self) -> Result<Option<WizardEvent>> {
        let domains = match selectors::fetch_domains(self.store) {
            Ok(domains) => domains,
            Err(e) => {
                self.fail("failed to fetch domains", e);
                return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
            }
        };
        if domains.is_empty() {
            self.warn("No domains available.");
            return Ok(None);
        }

        let names: Vec<String> = domains.iter().map(|d| d.name.clone()).collect();
        let domain_idx = Select::with_theme(&self.theme)
            .with_prompt("Domain")
            .items(&names)
            .default(0)
            .interact()
            .into_diagnostic()?;
        let domain = domains[domain_idx].clone();

        let subdomains = match selectors::fetch_subdomains(self.store, domain.id) {
            Ok(subdomains) => subdomains,
            Err(e) => {
                self.fail("failed to fetch subdomains", e);
                return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
            }
        };
        if subdomains.is_empty() {
            self.warn("This domain has no subdomains.");
            return Ok(Some(WizardEvent::Back));
        }

        let names: Vec<String> = subdomains.iter().map(|s| s.name.clone()).collect();
        let Some(idx) = self.select_with_back("Subdomain", &names)? else {
            return Ok(Some(WizardEvent::Back));
        };
        Ok(Some(WizardEvent::ScopeChosen(SubdomainChoice {
            domain,
            subdomain: subdomains[idx].clone(),
        })))
    }

    fn step_project_type(&self) -> Result<Option<WizardEvent>> {
        let items = vec![
            "Contractor Project".to_string(),
            "Supplier/Equipment Project".to_string(),
        ];
        let Some(idx) = self.select_with_back("Project type", &items)? else {
            return Ok(Some(WizardEvent::Back));
        };
        let project_type = if idx == 0 {
            ProjectType::Contractor
        } else {
            ProjectType::Supplier
        };
        Ok(Some(WizardEvent::ProjectTypeChosen(project_type)))
    }

    fn step_agreement(&self, draft: &Draft) -> Result<Option<WizardEvent>> {
        let Some(scope) = draft.scope.as_ref() else {
            return Ok(Some(WizardEvent::Back));
        };
        let types = match selectors::fetch_agreement_types(self.store, scope.subdomain.id) {
            Ok(types) => types,
            Err(e) => {
                self.fail("failed to fetch agreement types", e);
                return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
            }
        };
        if types.is_empty() {
            self.warn("No agreement types registered for this subdomain.");
            return Ok(Some(WizardEvent::Back));
        }
        let Some(idx) = self.select_with_back("Agreement type", &types)? else {
            return Ok(Some(WizardEvent::Back));
        };
        Ok(Some(WizardEvent::AgreementChosen(types[idx].clone())))
    }

    fn step_contractor(&self, draft: &Draft) -> Result<Option<WizardEvent>> {
        let Some(agreement) = draft.agreement_type.as_deref() else {
            return Ok(Some(WizardEvent::Back));
        };
        let picks = match selectors::fetch_contractors_for_agreement(self.store, agreement) {
            Ok(picks) => picks,
            Err(e) => {
                self.fail("failed to fetch contractors", e);
                return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
            }
        };
        if picks.is_empty() {
            self.warn("No contractors hold an agreement of this type.");
            return Ok(Some(WizardEvent::Back));
        }

        let labels: Vec<String> = picks.iter().map(contractor_label).collect();
        let Some(idx) = self.select_with_back("Contractor", &labels)? else {
            return Ok(Some(WizardEvent::Back));
        };
        match selectors::fetch_contractor(self.store, picks[idx].id) {
            Ok(contractor) => Ok(Some(WizardEvent::ContractorChosen(contractor))),
            Err(e) => {
                self.fail("failed to fetch contractor details", e);
                if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) }
            }
        }
    }

    fn step_equipment(&self, draft: &Draft) -> Result<Option<WizardEvent>> {
        let Some(scope) = draft.scope.as_ref() else {
            return Ok(Some(WizardEvent::Back));
        };
        let articles = match selectors::fetch_articles_for_subdomain(self.store, scope.subdomain.id)
        {
            Ok(articles) => articles,
            Err(e) => {
                self.fail("failed to fetch equipment", e);
                return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
            }
        };
        if articles.is_empty() {
            self.warn("No equipment registered under this subdomain.");
            return Ok(Some(WizardEvent::Back));
        }

        let labels: Vec<String> = articles.iter().map(article_label).collect();
        let preselected: Vec<bool> = articles
            .iter()
            .map(|a| draft.articles.iter().any(|chosen| chosen.id == a.id))
            .collect();
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt("Equipment (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&preselected)
            .interact()
            .into_diagnostic()?;

        if chosen.is_empty() {
            self.warn("Please select at least one article.");
            let back = Confirm::with_theme(&self.theme)
                .with_prompt("Go back to the previous step?")
                .default(false)
                .interact()
                .into_diagnostic()?;
            return Ok(Some(if back {
                WizardEvent::Back
            } else {
                // No-op event: stay on this step.
                WizardEvent::OptionsLoaded(draft.options.clone())
            }));
        }

        let selection: Vec<ArticleChoice> =
            chosen.into_iter().map(|i| articles[i].clone()).collect();
        Ok(Some(WizardEvent::EquipmentChosen(selection)))
    }

    fn step_suppliers(&self, draft: &mut Draft) -> Result<Option<WizardEvent>> {
        if draft.needs_supplier_options() {
            println!("{}", style("Loading supplier options...").dim());
            match selectors::fetch_manufacturer_options(self.store, &draft.articles) {
                Ok(options) => *draft = apply(draft.clone(), WizardEvent::OptionsLoaded(options)),
                Err(e) => {
                    self.fail("failed to fetch supplier options", e);
                    return if self.retry()? { Ok(Some(WizardEvent::Back)) } else { Ok(None) };
                }
            }
        }

        let mut rows: Vec<String> = draft.articles.iter().map(|a| assignment_row(draft, a)).collect();
        rows.push("Done".to_string());
        rows.push("Back".to_string());
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Assign a supplier to each article")
            .items(&rows)
            .default(0)
            .interact()
            .into_diagnostic()?;

        if choice == rows.len() - 1 {
            return Ok(Some(WizardEvent::Back));
        }
        if choice == rows.len() - 2 {
            if !draft.suppliers_complete() {
                self.warn("Please assign a supplier to each article.");
                // Stay on this step.
                return Ok(Some(WizardEvent::OptionsLoaded(draft.options.clone())));
            }
            return Ok(Some(WizardEvent::AssignmentsConfirmed));
        }

        let article = draft.articles[choice].clone();
        let references = draft.references_for(article.id);
        if references.is_empty() {
            self.warn("No suppliers registered for this article.");
            return Ok(Some(WizardEvent::OptionsLoaded(draft.options.clone())));
        }

        let Some(ref_idx) = self.select_with_back("Reference", &references)? else {
            return Ok(Some(WizardEvent::OptionsLoaded(draft.options.clone())));
        };
        let reference = references[ref_idx].clone();
        *draft = apply(
            draft.clone(),
            WizardEvent::ReferenceChosen {
                article: article.id,
                reference: reference.clone(),
            },
        );

        let options = draft.manufacturers_for(article.id, &reference);
        let labels: Vec<String> = options.iter().map(|&o| supplier_label(o)).collect();
        let manufacturers: Vec<_> = options.iter().map(|o| o.manufacturer_id).collect();
        let Some(idx) = self.select_with_back("Supplier", &labels)? else {
            return Ok(Some(WizardEvent::OptionsLoaded(draft.options.clone())));
        };
        Ok(Some(WizardEvent::ManufacturerChosen {
            article: article.id,
            manufacturer: manufacturers[idx],
        }))
    }

    /// `Ok(None)` signals a successful commit
    fn step_summary(&self, draft: &Draft) -> Result<Option<Option<WizardEvent>>> {
        self.print_summary(draft);

        let actions = vec![
            "Generate document".to_string(),
            "Finish project".to_string(),
        ];
        let Some(choice) = self.select_with_back("Action", &actions)? else {
            return Ok(Some(Some(WizardEvent::Back)));
        };

        match choice {
            0 => {
                // Non-destructive and repeatable; failures leave the draft
                // untouched.
                match self.generate_document(draft) {
                    Ok(filename) => {
                        println!("{} Document saved to {}", style("✓").green(), filename)
                    }
                    Err(e) => self.fail("failed to generate document", e),
                }
                Ok(Some(Some(WizardEvent::OptionsLoaded(draft.options.clone()))))
            }
            _ => match commit(self.store, self.ids, draft) {
                Ok(outcome) => {
                    println!(
                        "{} Project created: {} ({})",
                        style("✓").green(),
                        style(&outcome.name).bold(),
                        outcome.project_id.short()
                    );
                    Ok(None)
                }
                Err(e @ CommitError::Equipment { .. }) => {
                    // The project row was written; the draft stays intact so
                    // the user can decide what to do next.
                    self.fail("failed to finish project", e);
                    Ok(Some(Some(WizardEvent::OptionsLoaded(draft.options.clone()))))
                }
                Err(e) => {
                    self.fail("failed to create project", e);
                    Ok(Some(Some(WizardEvent::OptionsLoaded(draft.options.clone()))))
                }
            },
        }
    }

    fn print_summary(&self, draft: &Draft) {
        if let Some(name) = draft.project_name() {
            println!("Project name: {}", style(&name).bold());
        }
        if draft.project_type == Some(ProjectType::Supplier) {
            let stats = draft.stats();
            println!(
                "Equipment: {} items, {} suppliers, {} categories, {}% assigned",
                stats.equipment_count,
                stats.distinct_suppliers,
                stats.distinct_categories,
                stats.assignment_rate
            );
        }
        if let Some(contractor) = &draft.contractor {
            println!("Contractor: {}", contractor.name);
        }
    }

    fn generate_document(&self, draft: &Draft) -> Result<String> {
        let now = Utc::now();
        let script = build_summary(draft, now);
        let bytes = PlainRenderer
            .render(&script, PAGE_WIDTH)
            .into_diagnostic()?;
        let filename = document_filename(FILENAME_PREFIX, now.date_naive());
        std::fs::write(&filename, bytes).into_diagnostic()?;
        Ok(filename)
    }
}

fn contractor_label(pick: &selectors::ContractorPick) -> String {
    match pick.sigle.as_deref() {
        Some(sigle) if !sigle.is_empty() => format!("{} ({})", pick.name, sigle),
        _ => pick.name.clone(),
    }
}

fn article_label(article: &ArticleChoice) -> String {
    match article.category_name.as_deref() {
        Some(category) => format!("{} [{}]", article.name, category),
        None => article.name.clone(),
    }
}

fn supplier_label(option: &ManufacturerOption) -> String {
    if option.certified {
        format!("{} (ONEE Certified)", option.name)
    } else {
        option.name.clone()
    }
}

fn assignment_row(draft: &Draft, article: &ArticleChoice) -> String {
    match draft.assignments.get(&article.id) {
        Some(assignment) => {
            let supplier = assignment
                .manufacturer_id
                .and_then(|m| draft.option_for(article.id, m))
                .map(|o| o.name.as_str());
            match supplier {
                Some(name) => format!("{} → {} ({})", article.name, name, assignment.reference),
                None => format!("{} → reference {} (no supplier yet)", article.name, assignment.reference),
            }
        }
        None => format!("{} → unassigned", article.name),
    }
}
