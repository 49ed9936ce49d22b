//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    CleanupResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, KeyRequest,
    KeyResponse, KeysResponse, MessageResponse, MetricsResponse, PageKeyRequest, SetRequest,
    SetResponse, StatsResponse, WindowQuery, WindowResponse,
};
use crate::perf::PerformanceTimer;
use crate::virtual_list::VirtualListCalculator;

/// Application state shared across all handlers.
///
/// The cache is behind `Arc<RwLock<>>`: the store itself assumes exclusive
/// access, so every mutation goes through the write lock. The timer uses a
/// synchronous mutex so a timing can be ended from `Drop`; it is never held
/// across an await.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache of JSON payloads
    pub cache: Arc<RwLock<CacheStore<Value>>>,
    /// Request timings
    pub timer: Arc<Mutex<PerformanceTimer>>,
    /// Default window layout
    pub window: VirtualListCalculator,
}

impl AppState {
    /// Creates a new AppState with the given cache store and window layout.
    pub fn new(cache: CacheStore<Value>, window: VirtualListCalculator) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            timer: Arc::new(Mutex::new(PerformanceTimer::new())),
            window,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.max_entries, config.default_ttl_ms);
        let window =
            VirtualListCalculator::new(config.item_height, config.viewport_height, config.overscan)?;
        Ok(Self::new(cache, window))
    }
}

/// Handler for PUT /cache/set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, req.ttl_ms);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /cache/get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a stale read removes the entry
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache.ttl_remaining_ms(&key);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for GET /cache/has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.write().await.has(&key);
    Json(HasResponse { key, exists })
}

/// Handler for DELETE /cache/del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.write().await.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(ServiceError::NotFound(key))
    }
}

/// Handler for POST /cache/clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.clear();
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for GET /cache/keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let keys = state.cache.read().await.keys();
    Json(KeysResponse::new(keys))
}

/// Handler for POST /cache/cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let removed = state.cache.write().await.cleanup();
    Json(CleanupResponse { removed })
}

/// Handler for POST /cache/key
pub async fn key_handler(Json(req): Json<KeyRequest>) -> Json<KeyResponse> {
    Json(KeyResponse { key: req.to_key() })
}

/// Handler for POST /cache/page-key
pub async fn page_key_handler(Json(req): Json<PageKeyRequest>) -> Json<KeyResponse> {
    Json(KeyResponse { key: req.to_key() })
}

/// Handler for GET /window
///
/// Layout parameters missing from the query fall back to the configured ones.
pub async fn window_handler(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<WindowResponse>> {
    let defaults = state.window;
    let calculator = VirtualListCalculator::new(
        query.item_height.unwrap_or(defaults.item_height()),
        query.viewport_height.unwrap_or(defaults.viewport_height()),
        query.overscan.unwrap_or(defaults.overscan()),
    )?;

    Ok(Json(WindowResponse {
        range: calculator.calculate_visible_range(query.scroll_offset, query.total),
        total_height: calculator.calculate_total_height(query.total),
    }))
}

/// Handler for GET /metrics
///
/// `stats` summarises every completed request per route, while `metrics`
/// only holds the latest timing of each route.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    let timer = state.timer.lock();
    Json(MetricsResponse {
        report: timer.get_report(),
        metrics: timer.get_all_metrics().into_iter().cloned().collect(),
        stats: timer.get_all_stats(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.max_entries()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
