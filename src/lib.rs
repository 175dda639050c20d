//! TTL LRU Cache - A concurrency-safe in-memory cache
//!
//! Bounded key/value storage with least-recently-used eviction and
//! time-to-live expiration, served over a small HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::{spawn_sweeper, SweeperHandle};
