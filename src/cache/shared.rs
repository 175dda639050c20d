//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`].

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cloneable handle giving concurrent callers access to one [`CacheStore`].
///
/// Every operation holds a single exclusive lock for its whole duration, so a
/// `get` (which both reads and bumps recency) is atomic with respect to
/// every other caller, including the expiration sweeper.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Takes ownership of `store` and puts it behind the shared lock.
    pub fn new(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // == Get ==
    /// Looks up `key`, refreshing its recency. Expired entries read as absent.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().await.get(key)
    }

    // == Set ==
    /// Inserts or overwrites `key`, evicting the least recently used entry when full.
    pub async fn set(&self, key: K, value: V) {
        self.inner.lock().await.set(key, value);
    }

    // == Purge Expired ==
    /// Runs one expiration pass, returning the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        self.inner.lock().await.purge_expired()
    }

    // == Accessors ==
    /// Snapshot of the hit, miss and removal counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Maximum number of entries.
    pub async fn capacity(&self) -> usize {
        self.inner.lock().await.capacity()
    }

    /// Lifetime given to every write.
    pub async fn ttl(&self) -> Duration {
        self.inner.lock().await.ttl()
    }

    #[cfg(test)]
    pub(crate) async fn check_invariants(&self) -> std::result::Result<(), String> {
        self.inner.lock().await.check_invariants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(capacity: usize) -> SharedCache<i64, i64> {
        SharedCache::new(CacheStore::new(capacity, 300).unwrap())
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = shared(10);
        let other = cache.clone();

        cache.set(1, 10).await;

        assert_eq!(other.get(&1).await, Some(10));
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_sets_respect_capacity() {
        let cache = shared(16);

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.set(i, i * 10).await;
                    cache.get(&i).await
                })
            })
            .collect();

        for handle in handles {
            // Either our own write or evicted by a later writer, never a foreign value
            if let Some(value) = handle.await.unwrap() {
                assert_eq!(value % 10, 0);
            }
        }

        assert_eq!(cache.len().await, 16);
        assert_eq!(cache.stats().await.evictions, 48);
    }

    #[tokio::test]
    async fn test_accessors() {
        let cache = shared(4);

        cache.set(7, 70).await;

        assert_eq!(cache.capacity().await, 4);
        assert_eq!(cache.ttl().await, Duration::from_secs(300));
        assert!(!cache.is_empty().await);
        assert_eq!(cache.purge_expired().await, 0);
        assert_eq!(cache.get(&7).await, Some(70));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_workload_keeps_structure_consistent() {
        let capacity = 32;
        let cache = SharedCache::new(
            CacheStore::with_ttl(capacity, Duration::from_millis(2)).unwrap(),
        );

        let handles: Vec<_> = (0..8i64)
            .map(|worker| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for i in 0..500i64 {
                        let key = (worker * 31 + i) % 96;
                        match i % 5 {
                            0 | 1 => cache.set(key, key * 10).await,
                            2 | 3 => {
                                if let Some(value) = cache.get(&key).await {
                                    assert_eq!(value, key * 10);
                                }
                            }
                            _ => {
                                cache.purge_expired().await;
                            }
                        }
                        if i % 50 == 0 {
                            tokio::task::yield_now().await;
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        cache.check_invariants().await.unwrap();
        assert!(cache.len().await <= capacity);

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, cache.len().await);
    }
}
