//! Request timing middleware.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use super::handlers::AppState;
use crate::perf::TimingGuard;

/// Times each routed request under `"<METHOD> <route>"`.
///
/// The matched route template is used (`/cache/get/:key`), so timings group
/// per endpoint rather than per key. A request dropped mid-flight (client
/// gone, handler panic) is still ended by the guard.
pub async fn track_timing(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let name = format!("{} {}", req.method(), route);

    let timing = TimingGuard::start(&state.timer, &name);
    let response = next.run(req).await;
    timing.finish();

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::virtual_list::VirtualListCalculator;
    use axum::{body::Body, middleware, routing::get, Router};
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn timed_app(state: AppState) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "done"
                }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), track_timing))
            .with_state(state)
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_request_is_still_ended() {
        let state = AppState::new(
            CacheStore::new(10, 1_000),
            VirtualListCalculator::new(60, 400, 5).unwrap(),
        );
        let request = axum::http::Request::builder()
            .uri("/slow")
            .body(Body::empty())
            .unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_secs(1), timed_app(state.clone()).oneshot(request))
                .await;
        assert!(outcome.is_err());

        let timer = state.timer.lock();
        let metric = timer.get_metric("GET /slow").expect("request was timed");
        assert!(metric.is_completed());
    }
}
