//! Project summary draw-script assembly
//!
//! Pure translation of a draft (plus its statistics) into draw commands.
//! Given the same draft and timestamp the output is identical, so document
//! generation can be repeated from the summary step without side effects.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::identity::RowId;
use crate::entities::project::ProjectType;
use crate::render::draw::{
    truncate_field, DrawCommand, FontWeight, ScriptBuilder, LINE_HEIGHT, MARGIN, PAGE_WIDTH,
};
use crate::wizard::draft::Draft;

/// Filename prefix for generated summary documents
pub const FILENAME_PREFIX: &str = "project-summary";

/// Deterministic document filename: `{prefix}-{ISO-date}.pdf`
pub fn document_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.pdf", prefix, date.format("%Y-%m-%d"))
}

fn na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("N/A")
}

/// Build the full summary draw script for a draft
pub fn build_summary(draft: &Draft, generated: DateTime<Utc>) -> Vec<DrawCommand> {
    let mut script = ScriptBuilder::new();

    // Header banner
    script
        .rect_fill(0.0, 0.0, PAGE_WIDTH, 25.0)
        .font(FontWeight::Bold)
        .text_at(PAGE_WIDTH / 2.0, 17.0, "PROJECT SUMMARY REPORT")
        .move_to(35.0);

    script.heading("PROJECT OVERVIEW");
    let type_label = match draft.project_type {
        Some(ProjectType::Contractor) => "Contractor Project",
        Some(ProjectType::Supplier) => "Supplier/Equipment Project",
        None => "N/A",
    };
    script
        .label_value(
            "Project Date:",
            &generated.format("%Y-%m-%d").to_string(),
        )
        .label_value("Project Type:", type_label)
        .label_value(
            "Domain:",
            na(draft.scope.as_ref().map(|s| s.domain.name.as_str())),
        )
        .label_value(
            "Subdomain:",
            na(draft.scope.as_ref().map(|s| s.subdomain.name.as_str())),
        )
        .label_value("Agreement Type:", na(draft.agreement_type.as_deref()))
        .advance(10.0);

    script.heading("CONTRACTOR INFORMATION");
    match (&draft.contractor, draft.project_type) {
        (Some(contractor), Some(ProjectType::Contractor)) => {
            script
                .label_value("Name:", &contractor.name)
                .label_value("Sigle:", na(contractor.sigle.as_deref()))
                .label_value("Address:", na(contractor.address.as_deref()))
                .label_value("Phone:", na(contractor.phone.as_deref()))
                .label_value("Fax:", na(contractor.fax.as_deref()))
                .label_value("Country:", na(contractor.country.as_deref()));
        }
        _ => {
            script
                .font(FontWeight::Normal)
                .text(MARGIN, "No contractor information available")
                .advance(LINE_HEIGHT);
        }
    }
    script.advance(10.0);

    if draft.project_type == Some(ProjectType::Supplier) {
        equipment_sections(&mut script, draft);
    }

    // Footer
    script.font(FontWeight::Normal).text_at(
        MARGIN,
        280.0,
        format!("Generated on: {}", generated.format("%Y-%m-%d %H:%M:%S UTC")),
    );

    script.finish()
}

fn equipment_sections(script: &mut ScriptBuilder, draft: &Draft) {
    let stats = draft.stats();

    script.heading("EQUIPMENT SUMMARY");
    script
        .font(FontWeight::Normal)
        .text(MARGIN, format!("Total Equipment Items: {}", stats.equipment_count))
        .advance(LINE_HEIGHT)
        .text(MARGIN, format!("Suppliers Assigned: {}", stats.assigned_count))
        .advance(15.0);

    if draft.articles.is_empty() {
        script
            .font(FontWeight::Normal)
            .text(MARGIN, "No equipment selected for this project")
            .advance(10.0);
    } else {
        equipment_table(script, draft);
    }
    script.advance(15.0);

    supplier_details(script, draft);

    script.heading("PROJECT STATISTICS");
    let rows = [
        ("Total Equipment Items:", stats.equipment_count.to_string()),
        ("Suppliers Involved:", stats.distinct_suppliers.to_string()),
        ("Categories Covered:", stats.distinct_categories.to_string()),
        ("Assignment Rate:", format!("{}%", stats.assignment_rate)),
    ];
    for (label, value) in rows {
        script
            .font(FontWeight::Bold)
            .text(MARGIN, label)
            .font(FontWeight::Normal)
            .text(MARGIN + 80.0, value)
            .advance(LINE_HEIGHT);
    }
}

// Column offsets from the margin; truncation limits are characters.
const COL_EQUIPMENT: f32 = 12.0;
const COL_CATEGORY: f32 = 70.0;
const COL_SUPPLIER: f32 = 110.0;
const COL_REFERENCE: f32 = 145.0;
const COL_CERTIFIED: f32 = 172.0;

fn equipment_table(script: &mut ScriptBuilder, draft: &Draft) {
    script.heading("DETAILED EQUIPMENT & SUPPLIER ASSIGNMENTS");

    script.font(FontWeight::Bold);
    for (offset, title) in [
        (0.0, "No."),
        (COL_EQUIPMENT, "Equipment"),
        (COL_CATEGORY, "Category"),
        (COL_SUPPLIER, "Supplier"),
        (COL_REFERENCE, "Reference"),
        (COL_CERTIFIED, "ONEE"),
    ] {
        script.text(MARGIN + offset, title);
    }
    script.advance(LINE_HEIGHT).font(FontWeight::Normal);

    let content_width = PAGE_WIDTH - 2.0 * MARGIN;
    for (index, article) in draft.articles.iter().enumerate() {
        script.ensure_room();
        let y = script.cursor();
        script.rect_fill(MARGIN, y - 6.0, content_width, 10.0);

        let assignment = draft.assignments.get(&article.id);
        let option = assignment
            .and_then(|a| a.manufacturer_id)
            .and_then(|m| draft.option_for(article.id, m));

        script
            .text(MARGIN, (index + 1).to_string())
            .text(MARGIN + COL_EQUIPMENT, truncate_field(&article.name, 30))
            .text(
                MARGIN + COL_CATEGORY,
                truncate_field(na(article.category_name.as_deref()), 35),
            )
            .text(
                MARGIN + COL_SUPPLIER,
                truncate_field(na(option.map(|o| o.name.as_str())), 25),
            )
            .text(
                MARGIN + COL_REFERENCE,
                truncate_field(na(assignment.map(|a| a.reference.as_str())), 20),
            )
            .text(
                MARGIN + COL_CERTIFIED,
                if option.map(|o| o.certified).unwrap_or(false) {
                    "Yes"
                } else {
                    "No"
                },
            )
            .advance(12.0);
    }
}

fn supplier_details(script: &mut ScriptBuilder, draft: &Draft) {
    // Unique assigned manufacturers in assignment-map order, which is
    // stable across repeated generations of the same draft.
    let mut suppliers: Vec<RowId> = Vec::new();
    for assignment in draft.assignments.values() {
        if let Some(manufacturer) = assignment.manufacturer_id {
            if !suppliers.contains(&manufacturer) {
                suppliers.push(manufacturer);
            }
        }
    }
    if suppliers.is_empty() {
        return;
    }

    script.heading("SUPPLIER DETAILS");

    for manufacturer in suppliers {
        script.ensure_room();

        let option = draft
            .articles
            .iter()
            .find_map(|article| draft.option_for(article.id, manufacturer));
        let name = option.map(|o| o.name.as_str()).unwrap_or("Unknown");

        script
            .font(FontWeight::Bold)
            .text(MARGIN, format!("{}:", name))
            .advance(6.0)
            .font(FontWeight::Normal);

        if let Some(option) = option {
            script
                .text(MARGIN + 10.0, format!("Contact: {}", na(option.contact.as_deref())))
                .advance(6.0)
                .text(MARGIN + 10.0, format!("Phone: {}", na(option.phone.as_deref())))
                .advance(6.0)
                .text(MARGIN + 10.0, format!("Email: {}", na(option.email.as_deref())))
                .advance(6.0);
        }

        let equipment: Vec<String> = draft
            .articles
            .iter()
            .filter_map(|article| {
                let assignment = draft.assignments.get(&article.id)?;
                if assignment.manufacturer_id != Some(manufacturer) {
                    return None;
                }
                Some(format!("{} (Ref: {})", article.name, assignment.reference))
            })
            .collect();
        script
            .text(MARGIN + 10.0, format!("Equipment: {}", equipment.join(", ")))
            .advance(LINE_HEIGHT);
    }
    script.advance(15.0);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::identity::{IdSource, UuidSource};
    use crate::entities::domain::{Domain, Subdomain};
    use crate::wizard::draft::{
        apply, ArticleChoice, ManufacturerOption, SubdomainChoice, WizardEvent,
    };
    use chrono::TimeZone;

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

    fn supplier_draft(article_count: usize) -> Draft {
        let manufacturer = UuidSource.new_id();
        let articles: Vec<ArticleChoice> = (0..article_count)
            .map(|i| ArticleChoice {
                id: UuidSource.new_id(),
                name: format!("Item {}", i),
                category_name: Some("Switchgear".to_string()),
            })
            .collect();
        let mut options = BTreeMap::new();
        for article in &articles {
            options.insert(
                article.id,
                vec![ManufacturerOption {
                    manufacturer_id: manufacturer,
                    name: "Maker".to_string(),
                    reference: "REF-1".to_string(),
                    certified: true,
                    contact: Some("Sales".to_string()),
                    phone: None,
                    email: None,
                }],
            );
        }

        let mut draft = Draft::default();
        draft = apply(draft, WizardEvent::ScopeChosen(scope()));
        draft = apply(draft, WizardEvent::ProjectTypeChosen(ProjectType::Supplier));
        draft = apply(draft, WizardEvent::AgreementChosen("Framework".to_string()));
        draft = apply(draft, WizardEvent::EquipmentChosen(articles.clone()));
        draft = apply(draft, WizardEvent::OptionsLoaded(options));
        for article in &articles {
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
        }
        draft
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            document_filename(FILENAME_PREFIX, date),
            "project-summary-2024-03-15.pdf"
        );
    }

    #[test]
    fn test_script_opens_with_header_banner() {
        let script = build_summary(&Draft::default(), timestamp());
        assert!(matches!(
            script[0],
            DrawCommand::RectFill { x, y, width, .. }
                if x == 0.0 && y == 0.0 && width == PAGE_WIDTH
        ));
        assert!(matches!(&script[2], DrawCommand::Text { text, .. }
            if text == "PROJECT SUMMARY REPORT"));
    }

    #[test]
    fn test_generation_is_idempotent_for_fixed_input() {
        let draft = supplier_draft(3);
        let first = build_summary(&draft, timestamp());
        let second = build_summary(&draft, timestamp());
        assert_eq!(first, second);
    }

    #[test]
    fn test_supplier_script_includes_statistics() {
        let script = build_summary(&supplier_draft(3), timestamp());
        let texts: Vec<&str> = script
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"EQUIPMENT SUMMARY"));
        assert!(texts.contains(&"Total Equipment Items: 3"));
        assert!(texts.contains(&"PROJECT STATISTICS"));
        assert!(texts.contains(&"100%"));
        assert!(texts.contains(&"Equipment: Item 0 (Ref: REF-1), Item 1 (Ref: REF-1), Item 2 (Ref: REF-1)"));
    }

    #[test]
    fn test_contractor_section_placeholder_for_supplier_projects() {
        let script = build_summary(&supplier_draft(1), timestamp());
        assert!(script.iter().any(|c| matches!(c, DrawCommand::Text { text, .. }
            if text == "No contractor information available")));
    }

    #[test]
    fn test_long_equipment_table_breaks_pages() {
        let script = build_summary(&supplier_draft(40), timestamp());
        assert!(script.contains(&DrawCommand::PageBreak));
    }

    #[test]
    fn test_overlong_names_truncated_in_table() {
        let mut draft = supplier_draft(1);
        draft.articles[0].name =
            "Extremely long oil-immersed high voltage transformer assembly".to_string();
        let script = build_summary(&draft, timestamp());
        assert!(script.iter().any(|c| matches!(c, DrawCommand::Text { text, .. }
            if text.ends_with("...") && text.chars().count() == 30)));
    }

    #[test]
    fn test_footer_carries_generation_timestamp() {
        let script = build_summary(&Draft::default(), timestamp());
        assert!(script.iter().any(|c| matches!(c, DrawCommand::Text { text, y, .. }
            if *y == 280.0 && text == "Generated on: 2024-03-15 10:30:00 UTC")));
    }
}
