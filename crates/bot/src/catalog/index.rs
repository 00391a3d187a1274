//! Code → category index for O(1) cart-code resolution.

use std::collections::HashMap;

use tracing::warn;

use divano_core::{Category, ProductCode};

use super::{CatalogCache, CatalogItem, InventoryApi, ProductCodeTable};

/// Precomputed mapping from product code to its declaring category.
///
/// Built once from static configuration so a bare cart code resolves without
/// scanning every category. When a code appears under more than one category
/// the first declaration in configuration order wins, matching the scan
/// order the index replaces.
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    by_code: HashMap<ProductCode, Category>,
}

impl ProductIndex {
    /// Build the index from the product table.
    #[must_use]
    pub fn build(table: &ProductCodeTable) -> Self {
        let mut by_code = HashMap::new();

        for category in table.categories() {
            for (code, _) in table.codes(category) {
                if let Some(existing) = by_code.get(code) {
                    warn!(
                        %code,
                        kept = %existing,
                        ignored = %category,
                        "product code declared in more than one category"
                    );
                    continue;
                }
                by_code.insert(code.clone(), category.clone());
            }
        }

        Self { by_code }
    }

    /// The category that statically declares a code, if any.
    #[must_use]
    pub fn category_of(&self, code: &ProductCode) -> Option<&Category> {
        self.by_code.get(code)
    }

    /// Resolve a code to its category and current live catalog item.
    ///
    /// A code that is configured but currently out of stock resolves to
    /// `None` - the cart cannot tell "invalid code" from "temporarily out of
    /// stock". Deterministic for a fixed cache state.
    pub async fn resolve<C: InventoryApi + Clone + Send + Sync + 'static>(
        &self,
        cache: &CatalogCache<C>,
        code: &ProductCode,
    ) -> Option<(Category, CatalogItem)> {
        let category = self.by_code.get(code)?;
        let items = cache.get(category).await;
        let item = items.iter().find(|item| &item.code == code)?;
        Some((category.clone(), item.clone()))
    }
}
