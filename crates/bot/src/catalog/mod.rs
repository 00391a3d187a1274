//! Catalog synchronization: the remote inventory boundary, the per-category
//! source, the cache, and the code index.
//!
//! # Architecture
//!
//! - The inventory platform is source of truth - no local sync, one GET per
//!   product code at fetch time
//! - In-memory caching via `moka`, with a policy switch between
//!   cache-forever and no-cache
//! - A precomputed code→category index resolves bare cart codes without
//!   rescanning every category
//!
//! Absence of an item from a fetched category means "out of stock or lookup
//! failed"; it is the normal filtered state, never an error.

mod cache;
mod index;
mod inventory;
mod source;
mod table;

#[cfg(test)]
pub(crate) use source::tests as testing;

pub use cache::{CachePolicy, CatalogCache};
pub use index::ProductIndex;
pub use inventory::{InventoryApi, InventoryClient, InventoryError, StockRecord};
pub use source::CatalogSource;
pub use table::{ProductCodeTable, TableError};

use divano_core::ProductCode;
use serde::{Deserialize, Serialize};

/// A live, priced, in-stock snapshot of one product for one category.
///
/// Produced fresh from the remote source on every fetch and never persisted.
/// `quantity` is always at least 1; out-of-stock products are filtered out
/// upstream rather than carried with a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name from static configuration.
    pub name: String,
    /// Unit price in major currency units, floored at fetch time.
    pub price: i64,
    /// Remote stock figure, coerced to an integer.
    pub quantity: u32,
    /// External code the item was looked up by.
    pub code: ProductCode,
}
