//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto the shared cache.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, IntCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, KeyQuery, SetRequest, SetResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: IntCache,
}

impl AppState {
    /// Creates a new AppState around the given cache store.
    pub fn new(store: CacheStore<i64, i64>) -> Self {
        Self {
            cache: IntCache::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails with `InvalidConfiguration` for a zero capacity or TTL.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store = CacheStore::with_ttl(config.capacity, config.ttl())?;
        Ok(Self::new(store))
    }
}

fn key_from(query: std::result::Result<Query<KeyQuery>, QueryRejection>) -> Result<i64> {
    query
        .map(|Query(q)| q.key)
        .map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))
}

/// Handler for POST /set
///
/// Stores a key-value pair, evicting the least recently used entry if the
/// cache is full. Replies 201 Created.
pub async fn set_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SetResponse>)> {
    let Json(req) = body.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;

    state.cache.set(req.key, req.value).await;

    Ok((StatusCode::CREATED, Json(SetResponse::new(req.key))))
}

/// Handler for GET /get?key=
///
/// Retrieves a value by key. Absent and expired keys both yield 404.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<GetResponse>> {
    let key = key_from(query)?;

    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key.to_string())),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let capacity = state.cache.capacity().await;

    Json(StatsResponse::new(&stats, capacity))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
