//! Request-time cart pricing: the single source of truth for "what is my
//! cart worth right now".

use serde::Serialize;
use tracing::warn;

use divano_core::{ProductCode, UserId};

use crate::catalog::{CatalogCache, InventoryApi, ProductIndex};

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub code: ProductCode,
    pub name: String,
    /// Unit price in major currency units.
    pub unit_price: i64,
    pub quantity: u32,
    /// `unit_price * quantity`, integer arithmetic.
    pub line_total: i64,
}

/// Itemized cart pricing at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    /// Sum of line totals, major currency units.
    pub total: i64,
}

impl Receipt {
    /// Whether nothing in the cart resolved to a live item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Price a cart summary against the current catalog state.
///
/// Each code resolves through the product index; a code that fails to
/// resolve (configuration drift, out of stock, stale cache) is dropped from
/// both the itemized lines and the total. It stops contributing - nothing is
/// refunded or flagged back into the cart. Idempotent and side-effect free;
/// call it on every cart view so the rendering always reflects live pricing.
pub async fn price_cart<C: InventoryApi + Clone + Send + Sync + 'static>(
    index: &ProductIndex,
    cache: &CatalogCache<C>,
    user: UserId,
    summary: &[(ProductCode, u32)],
) -> Receipt {
    let mut receipt = Receipt::default();

    for (code, quantity) in summary {
        let Some((_, item)) = index.resolve(cache, code).await else {
            warn!(%user, %code, quantity, "cart code no longer resolves, dropping line");
            continue;
        };

        let line_total = item.price * i64::from(*quantity);
        receipt.total += line_total;
        receipt.lines.push(ReceiptLine {
            code: code.clone(),
            name: item.name,
            unit_price: item.price,
            quantity: *quantity,
            line_total,
        });
    }

    receipt
}
