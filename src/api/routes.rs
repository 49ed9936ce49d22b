//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, delete_handler, get_handler, has_handler, health_handler,
    key_handler, keys_handler, metrics_handler, page_key_handler, set_handler, stats_handler,
    window_handler, AppState,
};
use super::middleware::track_timing;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Timing: records every routed request in the shared timer
/// - CORS: Allows any origin, the browser client runs on another port
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache/set", put(set_handler))
        .route("/cache/get/:key", get(get_handler))
        .route("/cache/has/:key", get(has_handler))
        .route("/cache/del/:key", delete(delete_handler))
        .route("/cache/clear", post(clear_handler))
        .route("/cache/keys", get(keys_handler))
        .route("/cache/cleanup", post(cleanup_handler))
        .route("/cache/key", post(key_handler))
        .route("/cache/page-key", post(page_key_handler))
        .route("/window", get(window_handler))
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_timing))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
