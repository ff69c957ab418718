//! Shared cache handle
//!
//! The [`KeyValueCache`] port is what the services depend on; [`SharedCache`]
//! implements it over a [`CacheStore`] behind an async lock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};

/// Get/set contract with per-entry TTL. Values are JSON documents.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Returns the live value for `key`, or `None` on miss or expiry.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl`. Failures are logged, never raised.
    async fn set(&self, key: &str, value: String, ttl: Duration);
}

/// Reads and decodes a cached value. An undecodable value counts as a miss.
pub async fn get_json<T>(cache: &dyn KeyValueCache, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = cache.get(key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Discarding undecodable cache entry {}: {}", key, err);
            None
        }
    }
}

/// Encodes and stores a value.
pub async fn set_json<T>(cache: &dyn KeyValueCache, key: &str, value: &T, ttl: Duration)
where
    T: Serialize,
{
    match serde_json::to_string(value) {
        Ok(raw) => cache.set(key, raw, ttl).await,
        Err(err) => warn!("Could not encode cache entry {}: {}", key, err),
    }
}

// == Shared Cache ==
/// Process-wide cache handle, cheap to clone.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self::new(CacheStore::new(max_entries))
    }

    /// Snapshot of hit/miss/eviction counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueCache for SharedCache {
    async fn get(&self, key: &str) -> Option<String> {
        // write lock: reads update LRU order and stats
        let value = self.inner.write().await.get(key);
        if value.is_some() {
            debug!("Cache hit: {}", key);
        }
        value
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        if let Err(err) = self.inner.write().await.set(key, value, ttl) {
            warn!("Not caching {}: {}", key, err);
        }
    }
}
