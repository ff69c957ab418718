//! Detail Resolver
//!
//! Resolves one item by id through the detail cache, falling back to the
//! upstream API and normalizing what it returns.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{get_json, keys, set_json, KeyValueCache};
use crate::error::{ProxyError, Result};
use crate::models::Item;
use crate::upstream::CatalogApi;

/// Cached, normalized access to single items.
pub struct DetailResolver {
    upstream: Arc<dyn CatalogApi>,
    cache: Arc<dyn KeyValueCache>,
    ttl: Duration,
}

impl DetailResolver {
    pub fn new(upstream: Arc<dyn CatalogApi>, cache: Arc<dyn KeyValueCache>, ttl: Duration) -> Self {
        Self {
            upstream,
            cache,
            ttl,
        }
    }

    /// Returns the item with `id`.
    ///
    /// A hit is returned as stored. A miss costs one upstream call and exactly
    /// one cache write. Upstream 404 becomes [`ProxyError::ItemNotFound`]; other
    /// upstream failures are returned unchanged and nothing is cached.
    pub async fn resolve(&self, id: i64) -> Result<Item> {
        let key = keys::detail(id);

        if let Some(item) = get_json::<Item>(self.cache.as_ref(), &key).await {
            debug!("Serving detail {} from cache", id);
            return Ok(item);
        }

        let raw = match self.upstream.fetch_detail(id).await {
            Ok(raw) => raw,
            Err(ProxyError::UpstreamStatus { status: 404, .. }) => {
                return Err(ProxyError::ItemNotFound(id))
            }
            Err(err) => return Err(err),
        };

        let item = Item::from_detail(raw)?;
        set_json(self.cache.as_ref(), &key, &item, self.ttl).await;
        debug!("Cached detail {} under {}", id, key);

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SharedCache;
    use crate::upstream::fake::FakeCatalog;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(900);

    fn resolver(fake: FakeCatalog) -> (DetailResolver, Arc<FakeCatalog>, SharedCache) {
        let fake = Arc::new(fake);
        let cache = SharedCache::with_capacity(100);
        let resolver = DetailResolver::new(fake.clone(), Arc::new(cache.clone()), TTL);
        (resolver, fake, cache)
    }

    #[tokio::test]
    async fn test_resolve_normalizes_upstream_detail() {
        let mut fake = FakeCatalog::with_total(10);
        fake.documents.insert(
            1,
            json!({
                "id": 1, "name": "bulbasaur", "height": 7, "weight": 69,
                "types": [{"type": {"name": "grass"}}, {"type": {"name": "poison"}}],
                "sprites": {"front_default": "http://x/1.png"}
            }),
        );
        let (resolver, _, _) = resolver(fake);

        let item = resolver.resolve(1).await.unwrap();

        assert_eq!(item.name, "bulbasaur");
        assert_eq!(item.types, vec!["grass", "poison"]);
        assert_eq!(item.front_sprite.as_deref(), Some("http://x/1.png"));
    }

    #[tokio::test]
    async fn test_second_resolve_is_served_from_cache() {
        let (resolver, fake, cache) = resolver(FakeCatalog::with_total(10));

        let first = resolver.resolve(3).await.unwrap();
        let second = resolver.resolve(3).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fake.detail_calls(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_upstream_404_is_item_not_found() {
        let mut fake = FakeCatalog::with_total(10);
        fake.missing.insert(99999);
        let (resolver, _, cache) = resolver(fake);

        let result = resolver.resolve(99999).await;

        assert!(matches!(result, Err(ProxyError::ItemNotFound(99999))));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let mut fake = FakeCatalog::with_total(10);
        fake.broken.insert(5);
        let (resolver, _, _) = resolver(fake);

        let result = resolver.resolve(5).await;
        assert!(matches!(result, Err(ProxyError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_detail_is_not_cached() {
        let mut fake = FakeCatalog::with_total(10);
        fake.malformed.insert(2);
        let (resolver, fake, cache) = resolver(fake);

        assert!(matches!(
            resolver.resolve(2).await,
            Err(ProxyError::MalformedUpstream(_))
        ));
        assert!(cache.is_empty().await);

        // the failure is not remembered
        let _ = resolver.resolve(2).await;
        assert_eq!(fake.detail_calls(), 2);
    }
}
