//! Article (equipment/product) rows and the article/manufacturer join

use serde::{Deserialize, Serialize};

use crate::core::identity::RowId;

/// Table name for articles
pub const ARTICLES: &str = "articles";

/// Table name for the article/manufacturer join
pub const ARTICLE_MANUFACTURER: &str = "article_manufacturer";

/// A piece of equipment or product, child of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: RowId,
    pub name: String,
    pub category_id: RowId,
}

/// Join row registering a manufacturer+certification combination for an
/// article, grouped under a reference key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleManufacturer {
    pub id: RowId,
    pub article_id: RowId,
    pub manufacturer_id: RowId,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub certified_by_onee: bool,
}
