//! Debounce and Throttle
//!
//! Call-rate wrappers composed explicitly at the call site:
//! `throttle(f, limit)` and `debounce(f, wait, immediate)`.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

// == Throttle ==
/// Runs the wrapped function at most once per `limit`.
///
/// The first call runs immediately; calls arriving before `limit` has
/// elapsed since the last run are dropped.
#[derive(Debug)]
pub struct Throttle<F> {
    f: F,
    limit: Duration,
    last_run: Option<Instant>,
}

/// Wraps `f` so it runs at most once per `limit`.
pub fn throttle<F>(f: F, limit: Duration) -> Throttle<F> {
    Throttle {
        f,
        limit,
        last_run: None,
    }
}

impl<F> Throttle<F> {
    /// Calls the wrapped function unless throttled. Returns its result if it ran.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let now = Instant::now();
        if let Some(last) = self.last_run {
            if now.duration_since(last) < self.limit {
                return None;
            }
        }

        self.last_run = Some(now);
        Some((self.f)(arg))
    }
}

// == Debounce ==
/// Collapses bursts of calls into one.
///
/// Trailing mode runs the function with the last argument once `wait` has
/// passed without a new call. Immediate mode runs the first call of a burst
/// right away and ignores the rest until `wait` of quiet has passed.
/// Trailing calls run on a tokio task, so a runtime must be active.
#[derive(Debug)]
pub struct Debounce<F> {
    f: Arc<F>,
    wait: Duration,
    immediate: bool,
    pending: Option<JoinHandle<()>>,
}

/// Wraps `f` so bursts of calls collapse into one.
pub fn debounce<F>(f: F, wait: Duration, immediate: bool) -> Debounce<F> {
    Debounce {
        f: Arc::new(f),
        wait,
        immediate,
        pending: None,
    }
}

impl<F> Debounce<F> {
    /// Registers a call. Restarts the quiet period.
    pub fn call<A>(&mut self, arg: A)
    where
        F: Fn(A) + Send + Sync + 'static,
        A: Send + 'static,
    {
        let call_now = self.immediate && !self.is_pending();
        self.cancel();

        let wait = self.wait;
        if self.immediate {
            // The task only marks the end of the quiet period
            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(wait).await;
            }));
            if call_now {
                (*self.f)(arg);
            }
        } else {
            let f = Arc::clone(&self.f);
            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(wait).await;
                (*f)(arg);
            }));
        }
    }

    /// Whether a quiet period is still running.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Drops any pending trailing call.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
