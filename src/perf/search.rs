//! Debounced search.
//!
//! Wires an async search function behind a trailing [`Debounce`], so typing
//! in a search box only fires one backend query per quiet period.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::perf::{debounce, Debounce};

/// Quiet period before a search fires
pub const DEFAULT_SEARCH_WAIT: Duration = Duration::from_millis(300);

/// Debounces `search` and hands every outcome to `on_results`.
///
/// The query is trimmed first. A blank query delivers no results without
/// calling `search`. A failed search is logged and delivers no results.
/// Cancelling the returned debounce only drops a query still waiting out
/// its quiet period; a search already running completes.
pub fn debounced_search<T, E, S, Fut, C>(
    search: S,
    on_results: C,
    wait: Duration,
) -> Debounce<impl Fn(String) + Send + Sync + 'static>
where
    T: Send + 'static,
    E: Display + Send + 'static,
    S: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
    C: Fn(Vec<T>) + Send + Sync + 'static,
{
    let on_results = Arc::new(on_results);

    let run = move |query: String| {
        let query = query.trim().to_string();
        if query.is_empty() {
            (*on_results)(Vec::new());
            return;
        }

        let pending = search(query.clone());
        let on_results = Arc::clone(&on_results);
        tokio::spawn(async move {
            match pending.await {
                Ok(results) => (*on_results)(results),
                Err(err) => {
                    warn!("Search for '{}' failed: {}", query, err);
                    (*on_results)(Vec::new());
                }
            }
        });
    };

    debounce(run, wait, false)
}
