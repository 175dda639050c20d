//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with a TTL deadline.

use std::time::{Duration, Instant};

use super::MAX_TTL;

// == Cache Entry ==
/// A single cache slot: the key it belongs to, the stored value, and the
/// instant after which it is considered expired.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is stored under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Expiration deadline on the monotonic clock
    pub expires_at: Instant,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` from now.
    pub fn new(key: K, value: V, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: deadline(ttl),
        }
    }

    // == Refresh ==
    /// Replaces the value and pushes the deadline back to `ttl` from now.
    pub fn refresh(&mut self, value: V, ttl: Duration) {
        self.expires_at = deadline(ttl);
        self.value = value;
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so an entry whose TTL
    /// has fully elapsed is never served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

// == Deadline ==
/// Returns `now + ttl`, capped at [`MAX_TTL`] so the addition cannot overflow.
fn deadline(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(1, 10, Duration::from_secs(60));

        assert_eq!(entry.key, 1);
        assert_eq!(entry.value, 10);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1, 10, Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_refresh_resets_deadline() {
        let mut entry = CacheEntry::new(1, 10, Duration::from_millis(50));
        sleep(Duration::from_millis(80));
        assert!(entry.is_expired());

        entry.refresh(20, Duration::from_secs(60));

        assert_eq!(entry.value, 20);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let mut entry = CacheEntry::new(1, 10, Duration::MAX);
        assert!(!entry.is_expired());

        entry.refresh(20, Duration::MAX);
        assert_eq!(entry.value, 20);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry {
            key: 1,
            value: 10,
            expires_at: now,
        };

        // Expired exactly at the deadline
        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(now + Duration::from_millis(1)));

        let later = CacheEntry {
            key: 2,
            value: 20,
            expires_at: now + Duration::from_millis(1),
        };
        assert!(!later.is_expired_at(now));
    }
}
