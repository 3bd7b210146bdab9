//! Page metadata enrichment.
//!
//! Stored pages keep their tags as a single delimited string and have no
//! slug. [`enrich`] turns a stored [`Page`] into the [`PageResponse`] handed
//! to clients, adding the slug, the parsed tag list and the resolved
//! category.

mod slug;
mod tags;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use slug::{MAX_SLUG_CHARS, slugify};
pub use tags::tags_to_list;

/// A page record as it comes out of storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Raw delimited tag string, e.g. `"rust, wiki"`.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub last_modified_by: String,
    #[serde(default)]
    pub is_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The outward representation of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub id: i64,
    pub title: String,
    pub tags: String,
    pub category_id: Option<i64>,
    pub created_by: String,
    pub last_modified_by: String,
    pub is_locked: bool,
    pub seo_friendly_title: String,
    pub tag_list: Vec<String>,
    pub category: Option<Category>,
}

/// Resolves category ids. Storage lives elsewhere; this is the seam.
pub trait CategoryLookup: Send + Sync {
    fn category_by_id(&self, id: i64) -> Option<Category>;
}

/// A [`CategoryLookup`] over a fixed set of categories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategories {
    categories: HashMap<i64, Category>,
}

/// Errors loading categories from a file.
#[derive(thiserror::Error, Debug)]
pub enum CategoryError {
    #[error("failed to read categories file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse categories file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InMemoryCategories {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Load a JSON array of categories.
    pub fn load(path: &Path) -> Result<Self, CategoryError> {
        let content = std::fs::read_to_string(path)?;
        let categories: Vec<Category> = serde_json::from_str(&content)?;
        Ok(Self::new(categories))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryLookup for InMemoryCategories {
    fn category_by_id(&self, id: i64) -> Option<Category> {
        self.categories.get(&id).cloned()
    }
}

/// Build the outward representation of a stored page.
pub fn enrich(page: &Page, categories: &dyn CategoryLookup) -> PageResponse {
    let category = page
        .category_id
        .and_then(|id| categories.category_by_id(id));

    PageResponse {
        id: page.id,
        title: page.title.clone(),
        tags: page.tags.clone(),
        category_id: page.category_id,
        created_by: page.created_by.clone(),
        last_modified_by: page.last_modified_by.clone(),
        is_locked: page.is_locked,
        seo_friendly_title: slugify(&page.title),
        tag_list: tags_to_list(&page.tags),
        category,
    }
}
