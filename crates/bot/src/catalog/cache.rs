//! Per-category memoization of catalog fetches.

use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use divano_core::Category;

use super::{CatalogItem, CatalogSource, InventoryApi};

/// How long a fetched category stays authoritative.
///
/// Staleness under `Forever` is an accepted tradeoff for never issuing a
/// redundant upstream call; `Bypass` pays one full fetch per view for live
/// figures. Cart and session logic are agnostic to which is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// First access per category populates the cache; the entry is never
    /// re-fetched for the life of the process.
    #[default]
    Forever,
    /// Every access re-invokes the catalog source.
    Bypass,
}

impl CachePolicy {
    /// Parse the configuration spelling (`forever` | `bypass`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "forever" => Some(Self::Forever),
            "bypass" => Some(Self::Bypass),
            _ => None,
        }
    }
}

/// Memoizes [`CatalogSource::fetch`] results keyed by category.
///
/// Population on first access has no de-duplication guard: two
/// near-simultaneous first requests for the same category may both hit the
/// network. Acceptable minor redundancy, not a correctness bug.
#[derive(Clone)]
pub struct CatalogCache<C> {
    source: CatalogSource<C>,
    policy: CachePolicy,
    cache: Cache<Category, Arc<Vec<CatalogItem>>>,
}

impl<C: InventoryApi + Clone + Send + Sync + 'static> CatalogCache<C> {
    /// Create a cache over a catalog source with the given policy.
    #[must_use]
    pub fn new(source: CatalogSource<C>, policy: CachePolicy) -> Self {
        // No time-to-live: entries either live forever or are never written.
        let cache = Cache::builder().max_capacity(1_000).build();

        Self {
            source,
            policy,
            cache,
        }
    }

    /// Get the live items for a category, honoring the cache policy.
    pub async fn get(&self, category: &Category) -> Arc<Vec<CatalogItem>> {
        if self.policy == CachePolicy::Bypass {
            return Arc::new(self.source.fetch(category).await);
        }

        if let Some(items) = self.cache.get(category).await {
            debug!(%category, "catalog cache hit");
            return items;
        }

        let items = Arc::new(self.source.fetch(category).await);
        self.cache.insert(category.clone(), Arc::clone(&items)).await;
        items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::ProductCodeTable;
    use super::super::source::tests::FakeInventory;
    use super::*;

    fn cache_with(policy: CachePolicy) -> (FakeInventory, CatalogCache<FakeInventory>) {
        let table = Arc::new(
            ProductCodeTable::from_json(r#"{ "Sofas": { "S1": "Sofa A", "S2": "Sofa B" } }"#)
                .unwrap(),
        );
        let api = FakeInventory::default()
            .in_stock("S1", 5.0, 150_000)
            .in_stock("S2", 1.0, 80_000);
        let source = CatalogSource::new(api.clone(), table);
        (api, CatalogCache::new(source, policy))
    }

    #[tokio::test]
    async fn test_forever_policy_fetches_each_category_once() {
        let (api, cache) = cache_with(CachePolicy::Forever);
        let sofas = Category::new("Sofas");

        let first = cache.get(&sofas).await;
        let second = cache.get(&sofas).await;

        assert_eq!(first, second);
        // Two codes, one fetch pass.
        assert_eq!(api.lookups(), 2);
    }

    #[tokio::test]
    async fn test_bypass_policy_refetches_every_time() {
        let (api, cache) = cache_with(CachePolicy::Bypass);
        let sofas = Category::new("Sofas");

        cache.get(&sofas).await;
        cache.get(&sofas).await;

        assert_eq!(api.lookups(), 4);
    }

    #[tokio::test]
    async fn test_policies_return_identical_items() {
        let (_, forever) = cache_with(CachePolicy::Forever);
        let (_, bypass) = cache_with(CachePolicy::Bypass);
        let sofas = Category::new("Sofas");

        assert_eq!(forever.get(&sofas).await, bypass.get(&sofas).await);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(CachePolicy::parse("forever"), Some(CachePolicy::Forever));
        assert_eq!(CachePolicy::parse("BYPASS"), Some(CachePolicy::Bypass));
        assert_eq!(CachePolicy::parse("5m"), None);
    }
}
