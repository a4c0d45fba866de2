//! TTL-based query cache.
//!
//! Holds decoded GET responses keyed by request path. Entries go stale after
//! the configured TTL and are dropped eagerly when a mutation invalidates
//! them. A stale read removes its entry, and every insert sweeps the rest.
//! Caches are created at startup and handed to the services, so there is no
//! ambient global state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// A thread-safe cache of JSON responses with time-to-live expiration.
pub struct QueryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

struct CacheEntry {
    value: Value,
    inserted_at: Instant,
}

impl QueryCache {
    /// Create a new cache with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Insert a value, replacing any existing entry and resetting the TTL.
    ///
    /// Expired entries are swept first.
    pub async fn insert(&self, key: impl Into<String>, value: Value) {
        let swept = self.cleanup_expired().await;
        if swept > 0 {
            tracing::trace!(swept, "Swept expired cache entries");
        }
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Insert a value with an explicit timestamp (tests only).
    #[cfg(test)]
    pub async fn insert_at(&self, key: impl Into<String>, value: Value, inserted_at: Instant) {
        let entry = CacheEntry { value, inserted_at };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Get a value if it exists and hasn't expired; an expired entry is removed.
    pub async fn get(&self, key: &str) -> Option<Value> {
        {
            let guard = self.entries.read().await;
            match guard.get(key) {
                None => return None,
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
            }
        }

        let mut guard = self.entries.write().await;
        // Another writer may have refreshed the entry in between.
        if let Some(entry) = guard.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
            guard.remove(key);
        }
        None
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drop every entry whose key starts with `prefix`; returns how many.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut guard = self.entries.write().await;
        let before_count = guard.len();
        guard.retain(|key, _| !key.starts_with(prefix));
        before_count - guard.len()
    }

    /// Remove all expired entries and return the count of removed entries.
    pub async fn cleanup_expired(&self) -> usize {
        let mut guard = self.entries.write().await;
        let before_count = guard.len();
        guard.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before_count - guard.len()
    }

    /// Whether an entry is stored for `key`, fresh or not (tests only).
    #[cfg(test)]
    pub async fn holds(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_and_get() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("/areas/", json!([1])).await;
        assert_eq!(cache.get("/areas/").await, Some(json!([1])));
        assert_eq!(cache.get("/paths/").await, None);
    }

    #[tokio::test]
    async fn stale_read_evicts_entry() {
        let ttl = Duration::from_millis(10);
        let cache = QueryCache::new(ttl);
        let expired_at = Instant::now() - (ttl + Duration::from_millis(1));
        cache.insert_at("/areas/", json!([]), expired_at).await;

        assert!(cache.holds("/areas/").await);
        assert_eq!(cache.get("/areas/").await, None);
        assert!(!cache.holds("/areas/").await);
    }

    #[tokio::test]
    async fn insert_sweeps_expired_entries() {
        let ttl = Duration::from_millis(10);
        let cache = QueryCache::new(ttl);
        let expired_at = Instant::now() - (ttl + Duration::from_millis(1));
        cache.insert_at("/areas/", json!([]), expired_at).await;
        cache.insert_at("/paths/", json!([]), expired_at).await;

        cache.insert("/builds/", json!([])).await;
        assert!(!cache.holds("/areas/").await);
        assert!(!cache.holds("/paths/").await);
        assert_eq!(cache.get("/builds/").await, Some(json!([])));
        assert_eq!(cache.cleanup_expired().await, 0);
    }

    #[tokio::test]
    async fn prefix_invalidation_scopes_to_one_draft() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("/drafts/1/", json!({})).await;
        cache.insert("/drafts/1/application/", json!({})).await;
        cache.insert("/drafts/12/", json!({})).await;
        cache.insert("/areas/", json!([])).await;

        assert_eq!(cache.invalidate_prefix("/drafts/1/").await, 2);
        assert!(cache.get("/drafts/1/application/").await.is_none());
        assert!(cache.get("/drafts/12/").await.is_some());
        assert!(cache.get("/areas/").await.is_some());
    }

    #[tokio::test]
    async fn invalidate_single_key() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("/paths/", json!([])).await;
        assert!(cache.invalidate("/paths/").await);
        assert!(!cache.invalidate("/paths/").await);
    }
}
