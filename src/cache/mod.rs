//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

use std::time::Duration;

mod entry;
mod recency;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use recency::{RecencyIndex, Slot};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Integer-keyed cache served by the HTTP API.
pub type IntCache = SharedCache<i64, i64>;

// == Public Constants ==
/// Longest TTL accepted at construction (100 years)
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
