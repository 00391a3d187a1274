//! Static product configuration: the category → code → display-name table.
//!
//! Loaded once at process start from a local JSON file shaped like:
//!
//! ```json
//! {
//!     "Sofas": { "S1": "Sofa A", "S2": "Sofa B" },
//!     "Tables": { "T1": "Oak Table" }
//! }
//! ```
//!
//! The table is the sole source of which codes exist. Iteration order is
//! configuration order, for both categories and codes within a category,
//! which is why the maps are `IndexMap` and not `HashMap`.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use divano_core::{Category, ProductCode};

/// Errors that can occur when loading the product table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading the file failed.
    #[error("failed to read product table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not the expected JSON shape.
    #[error("failed to parse product table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mapping `Category` → `ProductCode` → display name, immutable after load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProductCodeTable {
    categories: IndexMap<Category, IndexMap<ProductCode, String>>,
}

impl ProductCodeTable {
    /// Load the table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `TableError` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse the table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `TableError::Parse` if the string is not the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Categories in configuration order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }

    /// Codes and display names configured under a category, in
    /// configuration order. Empty for an unknown category.
    pub fn codes(&self, category: &Category) -> impl Iterator<Item = (&ProductCode, &str)> {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|codes| codes.iter().map(|(code, name)| (code, name.as_str())))
    }

    /// Look up a category by its exact display text (a chat message).
    #[must_use]
    pub fn category_by_name(&self, text: &str) -> Option<&Category> {
        self.categories.keys().find(|c| c.as_str() == text)
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the table has no categories at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
