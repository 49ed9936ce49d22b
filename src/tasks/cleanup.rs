//! Cache Cleanup Task
//!
//! Background task that periodically sweeps stale cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Handle to a running cleanup task.
///
/// Owned by whoever created the cache. Dropping the handle aborts the task,
/// so the sweep never outlives its owner.
#[derive(Debug)]
pub struct CleanupTask {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Signals the task to stop and waits until its current sweep, if any,
    /// has finished.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(err) = (&mut self.handle).await {
            if !err.is_cancelled() {
                warn!("Cache cleanup task ended abnormally: {}", err);
            }
        }
        info!("Cache cleanup task stopped");
    }

    /// Aborts the task without waiting.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a task that calls [`CacheStore::cleanup`] every `interval`.
///
/// Sweeps run one after another inside a single loop, so a sweep never
/// overlaps the previous one. Missed ticks are delayed rather than bunched.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::<String>::new(100, 300_000)));
/// let cleanup = spawn_cleanup_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup.stop().await;
/// ```
pub fn spawn_cleanup_task<V>(cache: Arc<RwLock<CacheStore<V>>>, interval: Duration) -> CleanupTask
where
    V: Send + Sync + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {}ms",
            interval.as_millis()
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let removed = cache.write().await.cleanup();

                    if removed > 0 {
                        info!("Cache cleanup: removed {} stale entries", removed);
                    } else {
                        debug!("Cache cleanup: no stale entries found");
                    }
                }
            }
        }
    });

    CleanupTask {
        shutdown: Some(shutdown_tx),
        handle,
    }
}
