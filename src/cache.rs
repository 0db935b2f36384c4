//! Time-bounded cache for upstream responses.
//!
//! Entries are keyed by request URL and served until the revalidation window
//! elapses, after which the next lookup misses and the caller refetches.
//! The number of live entries is capped; inserting past the cap evicts the
//! oldest entry.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Entry cap used by [`ResponseCache::new`].
pub const DEFAULT_MAX_ENTRIES: usize = 64;

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

pub struct ResponseCache<T> {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> ResponseCache<T> {
    /// A zero `ttl` disables caching entirely.
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// Like [`ResponseCache::new`], holding at most `max_entries` (minimum 1).
    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Fresh value for `key`, if one is stored.
    pub async fn get(&self, key: &str) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }

        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, evicting anything already stale.
    pub async fn insert(&self, key: &str, value: T) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        if entries.len() < before {
            debug!("Evicted {} stale cache entries", before - entries.len());
        }

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!("Cache full ({} entries), evicting {}", self.max_entries, oldest);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_get() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("k", vec![1, 2, 3]).await;

        assert_eq!(cache.get("k").await, Some(vec![1, 2, 3]));
        assert_eq!(cache.get("other").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("k", 1).await;

        assert!(!cache.is_enabled());
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.insert("k", "value".to_string()).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_insert_evicts_stale_entries() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.insert("old", 1).await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.insert("new", 2).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("new").await, Some(2));
    }

    #[tokio::test]
    async fn test_insert_past_cap_evicts_oldest() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 3);
        for i in 0..10 {
            cache.insert(&format!("k{}", i), i).await;
            // Distinct insertion instants
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert_eq!(cache.len().await, 3);
        assert_eq!(cache.get("k0").await, None);
        assert_eq!(cache.get("k6").await, None);
        assert_eq!(cache.get("k7").await, Some(7));
        assert_eq!(cache.get("k9").await, Some(9));
    }

    #[tokio::test]
    async fn test_overwrite_at_cap_keeps_other_entries() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 2);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.insert("a", 3).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, Some(3));
        assert_eq!(cache.get("b").await, Some(2));
    }

    #[test]
    fn test_default_cap() {
        let cache: ResponseCache<u8> = ResponseCache::new(Duration::from_secs(1));
        assert_eq!(cache.max_entries, DEFAULT_MAX_ENTRIES);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("k", 1).await;
        cache.insert("k", 2).await;

        assert_eq!(cache.get("k").await, Some(2));

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
