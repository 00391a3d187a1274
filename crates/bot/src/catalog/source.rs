//! Per-category catalog fetch against the inventory boundary.

use std::sync::Arc;

use tracing::{debug, warn};

use divano_core::{Category, major_from_minor};

use super::{CatalogItem, InventoryApi, ProductCodeTable};

/// Fetches currently-in-stock items for a category, one remote lookup per
/// configured code.
///
/// A failing code is skipped with a warning and never aborts the remaining
/// codes; products with non-positive stock are excluded entirely, so absence
/// from the result IS the out-of-stock signal. Result ordering follows the
/// configuration order of codes within the category.
#[derive(Clone)]
pub struct CatalogSource<C> {
    api: C,
    table: Arc<ProductCodeTable>,
}

impl<C: InventoryApi> CatalogSource<C> {
    /// Create a source over an inventory API and the static product table.
    pub const fn new(api: C, table: Arc<ProductCodeTable>) -> Self {
        Self { api, table }
    }

    /// Fetch the live items for one category.
    ///
    /// Infallible for the caller: every per-code failure collapses into
    /// absence from the result.
    pub async fn fetch(&self, category: &Category) -> Vec<CatalogItem> {
        let mut items = Vec::new();

        for (code, name) in self.table.codes(category) {
            let record = match self.api.lookup(code).await {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) => {
                    warn!(%category, %code, error = %e, "inventory lookup failed, skipping code");
                    continue;
                }
            };

            // Fractional stock is floored; anything below one sellable unit
            // is out of stock.
            #[allow(clippy::cast_possible_truncation)]
            let stock = record.stock as i64;
            if stock <= 0 {
                continue;
            }

            let price = record
                .sale_price_minor
                .map_or(0, major_from_minor)
                .max(0);

            items.push(CatalogItem {
                name: name.to_string(),
                price,
                quantity: u32::try_from(stock).unwrap_or(u32::MAX),
                code: code.clone(),
            });
        }

        debug!(%category, count = items.len(), "fetched category from inventory");
        items
    }
}
