//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for the SET operation (POST /set)
///
/// Both fields are required; a body missing either is rejected before it
/// reaches the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: i64,
    /// The value to store
    pub value: i64,
}

/// Query string for key-addressed operations (`?key=<integer>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct KeyQuery {
    pub key: i64,
}
