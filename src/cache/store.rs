//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with a recency-ordered arena
//! and TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::recency::{RecencyIndex, Slot};
use crate::cache::{CacheEntry, CacheStats, MAX_TTL};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and a process-wide TTL.
///
/// `index` and `order` always describe the same set of keys: every key in
/// `index` points at a slot of `order` holding an entry with that key.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to position in the recency order
    index: HashMap<K, Slot>,
    /// Entries from most to least recently used
    order: RecencyIndex<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of every entry, counted from its last write
    ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL in seconds.
    ///
    /// # Errors
    /// `InvalidConfiguration` if either argument is zero or the TTL exceeds
    /// [`MAX_TTL`].
    pub fn new(capacity: usize, ttl_seconds: u64) -> Result<Self> {
        Self::with_ttl(capacity, Duration::from_secs(ttl_seconds))
    }

    /// Creates a new CacheStore with an arbitrary TTL duration.
    pub fn with_ttl(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if ttl > MAX_TTL {
            return Err(CacheError::InvalidConfiguration(format!(
                "ttl must not exceed {} seconds",
                MAX_TTL.as_secs()
            )));
        }

        Ok(Self {
            index: HashMap::new(),
            order: RecencyIndex::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it as most recently used.
    ///
    /// An entry whose deadline has passed is removed on the spot and
    /// reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self
            .order
            .get(slot)
            .map_or(true, |entry| entry.is_expired_at(Instant::now()));

        if expired {
            self.index.remove(key);
            self.order.remove(slot);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.sync_total_entries();
            return None;
        }

        self.order.move_to_front(slot);
        self.stats.record_hit();
        self.order.get(slot).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair. Never fails.
    ///
    /// An existing key gets the new value, a fresh deadline and moves to the
    /// front. A new key arriving at a full cache first evicts the least
    /// recently used entry, expired or not.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.refresh(value, self.ttl);
            }
            self.order.move_to_front(slot);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let slot = self
            .order
            .push_front(CacheEntry::new(key.clone(), value, self.ttl));
        self.index.insert(key, slot);
        self.sync_total_entries();
    }

    // == Purge Expired ==
    /// Removes every entry whose deadline has passed.
    ///
    /// Live entries are never touched. Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<Slot> = self
            .order
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(slot, _)| slot)
            .collect();

        let mut removed = 0;
        for slot in expired {
            if let Some(entry) = self.order.remove(slot) {
                self.index.remove(&entry.key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        self.sync_total_entries();
        removed
    }

    // == Evict LRU ==
    fn evict_lru(&mut self) {
        if let Some(evicted) = self.order.pop_back() {
            self.index.remove(&evicted.key);
            self.stats.record_eviction();
        }
    }

    fn sync_total_entries(&mut self) {
        self.stats.set_total_entries(self.index.len());
    }

    // == Accessors ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Returns the number of entries held, including expired ones not yet
    /// purged.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries before eviction kicks in.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lifetime given to each entry on every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Test Helpers ==
    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.order.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    /// Verifies that `index` and `order` describe the same entries.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.index.len() != self.order.len() {
            return Err(format!(
                "index holds {} keys but order holds {} entries",
                self.index.len(),
                self.order.len()
            ));
        }
        if self.index.len() > self.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            ));
        }
        for (key, slot) in &self.index {
            match self.order.get(*slot) {
                Some(entry) if entry.key == *key => {}
                _ => return Err("index points at a slot holding another key".to_string()),
            }
        }
        if self.order.iter().count() != self.order.len() {
            return Err("recency links do not cover every entry".to_string());
        }
        Ok(())
    }
}
