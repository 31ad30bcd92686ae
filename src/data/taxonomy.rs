//! Fixed classification space loaded from the taxonomy file.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::EnrichError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subcategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Subcategory>,
}

impl Category {
    /// Text embedded to represent the category: its name followed by its
    /// subcategory names, space separated.
    pub fn descriptor(&self) -> String {
        let children: Vec<&str> = self.children.iter().map(|c| c.name.as_str()).collect();
        format!("{} {}", self.name, children.join(" "))
    }
}

/// Ordered, non-empty list of top-level categories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Taxonomy {
    pub children: Vec<Category>,
}

impl Taxonomy {
    pub fn new(children: Vec<Category>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn descriptors(&self) -> Vec<String> {
        self.children.iter().map(Category::descriptor).collect()
    }

    /// Category at a 1-based position.
    pub fn category(&self, index: usize) -> Option<&Category> {
        index.checked_sub(1).and_then(|i| self.children.get(i))
    }
}

pub fn parse_taxonomy(raw: &[u8], path: &Path) -> Result<Taxonomy, EnrichError> {
    let malformed = |reason: String| EnrichError::TaxonomyMalformed {
        path: path.to_path_buf(),
        reason,
    };
    let taxonomy: Taxonomy = serde_json::from_slice(raw).map_err(|err| malformed(err.to_string()))?;
    if taxonomy.is_empty() {
        return Err(malformed("no categories".to_string()));
    }
    Ok(taxonomy)
}

pub async fn load_taxonomy(path: &Path) -> Result<Taxonomy, EnrichError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| EnrichError::TaxonomyUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    let taxonomy = parse_taxonomy(&raw, path)?;
    info!(path = %path.display(), categories = taxonomy.len(), "loaded taxonomy");
    Ok(taxonomy)
}
