//! Step selector queries
//!
//! Each wizard step owns exactly the reads declared here, scoped by the
//! values collected so far. Selectors never write to the store. The
//! interactive prompt layer stays thin over these functions so they can be
//! exercised against the in-memory store.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::identity::RowId;
use crate::entities::article;
use crate::entities::category;
use crate::entities::contractor::{self, Contractor};
use crate::entities::domain::{self, Domain, Subdomain};
use crate::store::{related, rows, single_row, CatalogStore, Filter, OneOrMany, Select, StoreError};
use crate::wizard::draft::{ArticleChoice, ManufacturerOption};

/// All domains, ordered by name
pub fn fetch_domains(store: &dyn CatalogStore) -> Result<Vec<Domain>, StoreError> {
    let values = store.select(&Select::from(domain::DOMAINS).order_by("name"))?;
    rows(values)
}

/// Subdomains of one domain, ordered by name
pub fn fetch_subdomains(
    store: &dyn CatalogStore,
    domain_id: RowId,
) -> Result<Vec<Subdomain>, StoreError> {
    let values = store.select(
        &Select::from(domain::SUBDOMAINS)
            .filter(Filter::Eq("domain_id".into(), domain_id.to_string()))
            .order_by("name"),
    )?;
    rows(values)
}

#[derive(Debug, Deserialize)]
struct AgreementTypeRow {
    #[serde(rename = "type")]
    agreement_type: String,
}

/// Distinct agreement-type labels available in a subdomain, in first-seen
/// order
pub fn fetch_agreement_types(
    store: &dyn CatalogStore,
    subdomain_id: RowId,
) -> Result<Vec<String>, StoreError> {
    let values = store.select(
        &Select::from(contractor::CONTRACTOR_AGREEMENTS)
            .columns("type")
            .filter(Filter::Eq("subdomain_id".into(), subdomain_id.to_string())),
    )?;
    let mut types = Vec::new();
    for row in rows::<AgreementTypeRow>(values)? {
        if !types.contains(&row.agreement_type) {
            types.push(row.agreement_type);
        }
    }
    Ok(types)
}

/// Contractor name/sigle as embedded in an agreement row
#[derive(Debug, Clone, Deserialize)]
pub struct ContractorSummary {
    pub name: String,
    #[serde(default)]
    pub sigle: Option<String>,
}

/// A contractor offered for selection, deduplicated across its agreements
#[derive(Debug, Clone)]
pub struct ContractorPick {
    pub id: RowId,
    pub name: String,
    pub sigle: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContractorAgreementRow {
    contractor_id: Option<RowId>,
    #[serde(default)]
    contractors: Option<OneOrMany<ContractorSummary>>,
}

/// Contractors holding an agreement matching the given type, unique by
/// contractor id
pub fn fetch_contractors_for_agreement(
    store: &dyn CatalogStore,
    agreement_type: &str,
) -> Result<Vec<ContractorPick>, StoreError> {
    let values = store.select(
        &Select::from(contractor::CONTRACTOR_AGREEMENTS)
            .columns("contractor_id, contractors(name, sigle)")
            .filter(Filter::Contains("type".into(), agreement_type.to_string())),
    )?;

    let mut picks: Vec<ContractorPick> = Vec::new();
    for row in rows::<ContractorAgreementRow>(values)? {
        let (Some(id), Some(summary)) = (row.contractor_id, related(row.contractors)) else {
            continue;
        };
        if picks.iter().any(|p| p.id == id) {
            continue;
        }
        picks.push(ContractorPick {
            id,
            name: summary.name,
            sigle: summary.sigle,
        });
    }
    Ok(picks)
}

/// Fetch the full contractor row for the chosen pick
pub fn fetch_contractor(
    store: &dyn CatalogStore,
    contractor_id: RowId,
) -> Result<Contractor, StoreError> {
    let values = store.select(
        &Select::from(contractor::CONTRACTORS)
            .filter(Filter::Eq("id".into(), contractor_id.to_string())),
    )?;
    single_row(contractor::CONTRACTORS, values)
}

#[derive(Debug, Deserialize)]
struct CategoryNameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArticleRow {
    id: RowId,
    name: String,
    #[serde(default)]
    category: Option<OneOrMany<CategoryNameRow>>,
}

/// Articles available under a subdomain.
///
/// Two-phase fetch: the store has no single join path from subdomain to
/// article, so resolve the subdomain's categories first, then fetch articles
/// restricted to that category set with the category name embedded.
pub fn fetch_articles_for_subdomain(
    store: &dyn CatalogStore,
    subdomain_id: RowId,
) -> Result<Vec<ArticleChoice>, StoreError> {
    let category_values = store.select(
        &Select::from(category::CATEGORIES)
            .filter(Filter::Eq("subdomain_id".into(), subdomain_id.to_string())),
    )?;
    let category_ids: Vec<String> = rows::<category::Category>(category_values)?
        .into_iter()
        .map(|row| row.id.to_string())
        .collect();

    if category_ids.is_empty() {
        return Ok(Vec::new());
    }

    let article_values = store.select(
        &Select::from(article::ARTICLES)
            .columns("id, name, category:categories!inner(name)")
            .filter(Filter::In("category_id".into(), category_ids)),
    )?;

    Ok(rows::<ArticleRow>(article_values)?
        .into_iter()
        .map(|row| ArticleChoice {
            id: row.id,
            name: row.name,
            category_name: related(row.category).map(|c| c.name),
        })
        .collect())
}

/// Group article choices by category name for display. The selection set
/// still operates over individual article ids regardless of grouping.
pub fn group_by_category(articles: &[ArticleChoice]) -> Vec<(String, Vec<&ArticleChoice>)> {
    let mut groups: Vec<(String, Vec<&ArticleChoice>)> = Vec::new();
    for article in articles {
        let name = article
            .category_name
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        match groups.iter_mut().find(|(group, _)| *group == name) {
            Some((_, members)) => members.push(article),
            None => groups.push((name, vec![article])),
        }
    }
    groups
}

#[derive(Debug, Deserialize)]
struct ManufacturerSummary {
    name: String,
    #[serde(default)]
    contact: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleManufacturerRow {
    manufacturer_id: Option<RowId>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    certified_by_onee: Option<bool>,
    #[serde(default)]
    manufacturers: Option<OneOrMany<ManufacturerSummary>>,
}

/// Manufacturer+certification options for each selected article, merged
/// into one map keyed by article id. One read per article; rows missing the
/// manufacturer join are skipped.
pub fn fetch_manufacturer_options(
    store: &dyn CatalogStore,
    articles: &[ArticleChoice],
) -> Result<BTreeMap<RowId, Vec<ManufacturerOption>>, StoreError> {
    let mut options = BTreeMap::new();
    for article_choice in articles {
        let values = store.select(
            &Select::from(article::ARTICLE_MANUFACTURER)
                .columns(
                    "manufacturer_id, reference, certified_by_onee, \
                     manufacturers(name, contact, phone, email)",
                )
                .filter(Filter::Eq("article_id".into(), article_choice.id.to_string())),
        )?;

        let mut article_options = Vec::new();
        for row in rows::<ArticleManufacturerRow>(values)? {
            let (Some(id), Some(manufacturer)) = (row.manufacturer_id, related(row.manufacturers))
            else {
                continue;
            };
            article_options.push(ManufacturerOption {
                manufacturer_id: id,
                name: manufacturer.name,
                reference: row.reference.unwrap_or_else(|| "No Reference".to_string()),
                certified: row.certified_by_onee.unwrap_or(false),
                contact: manufacturer.contact,
                phone: manufacturer.phone,
                email: manufacturer.email,
            });
        }
        options.insert(article_choice.id, article_options);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{IdSource, UuidSource};
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_fetch_domains_ordered() {
        let store = MemoryStore::new().with_table(
            domain::DOMAINS,
            vec![
                json!({"id": UuidSource.new_id(), "name": "Mechanical"}),
                json!({"id": UuidSource.new_id(), "name": "Electrical"}),
            ],
        );
        let domains = fetch_domains(&store).unwrap();
        assert_eq!(domains[0].name, "Electrical");
        assert_eq!(domains[1].name, "Mechanical");
    }

    #[test]
    fn test_fetch_subdomains_scoped_to_domain() {
        let domain_id = UuidSource.new_id();
        let other = UuidSource.new_id();
        let store = MemoryStore::new().with_table(
            domain::SUBDOMAINS,
            vec![
                json!({"id": UuidSource.new_id(), "name": "Transformers", "domain_id": domain_id}),
                json!({"id": UuidSource.new_id(), "name": "Cables", "domain_id": other}),
            ],
        );
        let subdomains = fetch_subdomains(&store, domain_id).unwrap();
        assert_eq!(subdomains.len(), 1);
        assert_eq!(subdomains[0].name, "Transformers");
    }

    #[test]
    fn test_agreement_types_deduplicated_first_seen_order() {
        let subdomain_id = UuidSource.new_id();
        let store = MemoryStore::new().with_table(
            contractor::CONTRACTOR_AGREEMENTS,
            vec![
                json!({"subdomain_id": subdomain_id, "type": "Framework"}),
                json!({"subdomain_id": subdomain_id, "type": "Spot"}),
                json!({"subdomain_id": subdomain_id, "type": "Framework"}),
                json!({"subdomain_id": UuidSource.new_id(), "type": "Other"}),
            ],
        );
        let types = fetch_agreement_types(&store, subdomain_id).unwrap();
        assert_eq!(types, vec!["Framework".to_string(), "Spot".to_string()]);
    }

    #[test]
    fn test_contractors_deduplicated_and_join_shapes_normalized() {
        let contractor_id = UuidSource.new_id();
        let store = MemoryStore::new().with_table(
            contractor::CONTRACTOR_AGREEMENTS,
            vec![
                // Nested object shape
                json!({
                    "type": "Framework",
                    "contractor_id": contractor_id,
                    "contractors": {"name": "Acme Corp", "sigle": "ACM"},
                }),
                // Array-of-one shape for the same contractor
                json!({
                    "type": "Framework 2024",
                    "contractor_id": contractor_id,
                    "contractors": [{"name": "Acme Corp", "sigle": "ACM"}],
                }),
                // Missing join: skipped
                json!({"type": "Framework", "contractor_id": UuidSource.new_id()}),
            ],
        );
        let picks = fetch_contractors_for_agreement(&store, "Framework").unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].name, "Acme Corp");
        assert_eq!(picks[0].sigle.as_deref(), Some("ACM"));
    }

    #[test]
    fn test_articles_two_phase_fetch() {
        let subdomain_id = UuidSource.new_id();
        let cat_a = UuidSource.new_id();
        let cat_other = UuidSource.new_id();
        let store = MemoryStore::new()
            .with_table(
                category::CATEGORIES,
                vec![
                    json!({"id": cat_a, "name": "Switchgear", "subdomain_id": subdomain_id}),
                    json!({"id": cat_other, "name": "Cables", "subdomain_id": UuidSource.new_id()}),
                ],
            )
            .with_table(
                article::ARTICLES,
                vec![
                    json!({
                        "id": UuidSource.new_id(),
                        "name": "Breaker",
                        "category_id": cat_a,
                        "category": {"name": "Switchgear"},
                    }),
                    json!({
                        "id": UuidSource.new_id(),
                        "name": "HV Cable",
                        "category_id": cat_other,
                        "category": {"name": "Cables"},
                    }),
                ],
            );
        let articles = fetch_articles_for_subdomain(&store, subdomain_id).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].name, "Breaker");
        assert_eq!(articles[0].category_name.as_deref(), Some("Switchgear"));
    }

    #[test]
    fn test_articles_empty_when_subdomain_has_no_categories() {
        let store = MemoryStore::new();
        let articles = fetch_articles_for_subdomain(&store, UuidSource.new_id()).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_grouping_preserves_selection_identity() {
        let articles = vec![
            ArticleChoice {
                id: UuidSource.new_id(),
                name: "Breaker".into(),
                category_name: Some("Switchgear".into()),
            },
            ArticleChoice {
                id: UuidSource.new_id(),
                name: "Relay".into(),
                category_name: None,
            },
            ArticleChoice {
                id: UuidSource.new_id(),
                name: "Fuse".into(),
                category_name: Some("Switchgear".into()),
            },
        ];
        let groups = group_by_category(&articles);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Switchgear");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Uncategorized");
    }

    #[test]
    fn test_manufacturer_options_merged_per_article() {
        let first = ArticleChoice {
            id: UuidSource.new_id(),
            name: "Breaker".into(),
            category_name: None,
        };
        let second = ArticleChoice {
            id: UuidSource.new_id(),
            name: "Relay".into(),
            category_name: None,
        };
        let maker = UuidSource.new_id();
        let store = MemoryStore::new().with_table(
            article::ARTICLE_MANUFACTURER,
            vec![
                json!({
                    "article_id": first.id,
                    "manufacturer_id": maker,
                    "reference": "REF-1",
                    "certified_by_onee": true,
                    "manufacturers": {"name": "Maker", "email": "sales@maker.example"},
                }),
                // Null reference defaults to the placeholder key
                json!({
                    "article_id": second.id,
                    "manufacturer_id": maker,
                    "reference": null,
                    "manufacturers": [{"name": "Maker"}],
                }),
                // Missing manufacturer join: skipped
                json!({"article_id": second.id, "manufacturer_id": null, "reference": "X"}),
            ],
        );

        let options =
            fetch_manufacturer_options(&store, &[first.clone(), second.clone()]).unwrap();
        assert_eq!(options[&first.id].len(), 1);
        assert!(options[&first.id][0].certified);
        assert_eq!(options[&first.id][0].email.as_deref(), Some("sales@maker.example"));
        assert_eq!(options[&second.id].len(), 1);
        assert_eq!(options[&second.id][0].reference, "No Reference");
        assert!(!options[&second.id][0].certified);
    }
}
