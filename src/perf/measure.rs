//! Timing Wrappers
//!
//! Run a closure or future under a named timer. The timing is recorded
//! whatever the outcome, and the outcome is handed back untouched.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::perf::{PerformanceMetric, PerformanceTimer};

// == Timing Guard ==
/// Ends a started timer when dropped.
///
/// A future that panics inside a spawned task, or that is dropped before
/// completion (timeout, client disconnect), never reaches the code after its
/// `.await`. The guard still ends the metric from `Drop` in both cases.
#[must_use = "dropping the guard ends the timing immediately"]
pub struct TimingGuard<'a> {
    timer: &'a Mutex<PerformanceTimer>,
    name: &'a str,
    finished: bool,
}

impl<'a> TimingGuard<'a> {
    pub fn start(timer: &'a Mutex<PerformanceTimer>, name: &'a str) -> Self {
        timer.lock().start(name, None);
        Self {
            timer,
            name,
            finished: false,
        }
    }

    /// Ends the timing and returns the completed metric.
    pub fn finish(mut self) -> Option<PerformanceMetric> {
        self.finished = true;
        self.timer.lock().end(self.name)
    }
}

impl Drop for TimingGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(metric) = self.timer.lock().end(self.name) {
            debug!(
                "[timing] {}: {:.2}ms (abandoned)",
                self.name,
                metric.duration_ms.unwrap_or_default()
            );
        }
    }
}

/// Times `future` under `name`, recording the metric for both `Ok` and `Err`.
///
/// The timer lock is only held to start and to end, never across the await.
/// Panics and cancellation still complete the metric through [`TimingGuard`].
pub async fn measure_async<T, E, F>(
    timer: &Mutex<PerformanceTimer>,
    name: &str,
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let guard = TimingGuard::start(timer, name);
    let result = future.await;
    let metric = guard.finish();

    if result.is_err() {
        let elapsed = metric.and_then(|m| m.duration_ms).unwrap_or_default();
        warn!("[timing] {}: {:.2}ms (failed)", name, elapsed);
    }

    result
}

/// Times `f` under `name`. A panic in `f` is resumed after the metric is recorded.
pub fn measure_sync<R>(timer: &mut PerformanceTimer, name: &str, f: impl FnOnce() -> R) -> R {
    timer.start(name, None);
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    timer.end(name);

    match outcome {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}
