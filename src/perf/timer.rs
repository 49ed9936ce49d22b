//! Performance Timer
//!
//! Named start/stop timers. One timer per name: starting a name again before
//! it ended discards the earlier start.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::perf::PerformanceReport;

// == Performance Metric ==
/// A started, and possibly completed, timing.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetric {
    pub name: String,
    /// Wall-clock start, for display
    pub started_at: DateTime<Utc>,
    /// Elapsed milliseconds, None while still running
    pub duration_ms: Option<f64>,
    /// Caller-supplied context recorded at start
    pub metadata: Option<serde_json::Value>,
    #[serde(skip)]
    start: Instant,
}

impl PerformanceMetric {
    fn started(name: &str, metadata: Option<serde_json::Value>) -> Self {
        Self {
            name: name.to_string(),
            started_at: Utc::now(),
            duration_ms: None,
            metadata,
            start: Instant::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.duration_ms.is_some()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms
            .map(|ms| Duration::from_secs_f64(ms / 1000.0))
    }
}

/// Handle returned by [`PerformanceTimer::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn Fn(&PerformanceMetric) + Send + Sync>;

/// Samples kept per name; older ones are dropped first
pub const MAX_SAMPLES_PER_NAME: usize = 1000;

// == Performance Timer ==
/// Records named timings and notifies observers when one completes.
///
/// Observers run synchronously inside [`PerformanceTimer::end`]. A panicking
/// observer is logged and skipped; the others still run and `end` still
/// returns the metric.
///
/// Besides the latest metric per name, every completed duration is kept as
/// a sample under its name, so repeated timings of the same operation can
/// be summarised with [`PerformanceTimer::get_metric_stats`].
#[derive(Default)]
pub struct PerformanceTimer {
    metrics: HashMap<String, PerformanceMetric>,
    samples: HashMap<String, VecDeque<f64>>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl fmt::Debug for PerformanceTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceTimer")
            .field("metrics", &self.metrics)
            .field("sampled_names", &self.samples.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PerformanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // == Start ==
    /// Starts timing `name`, replacing any earlier metric of that name.
    pub fn start(&mut self, name: &str, metadata: Option<serde_json::Value>) {
        self.metrics
            .insert(name.to_string(), PerformanceMetric::started(name, metadata));
    }

    // == End ==
    /// Completes the running timer `name` and returns the completed metric.
    ///
    /// Returns None if `name` was never started or has already ended.
    pub fn end(&mut self, name: &str) -> Option<PerformanceMetric> {
        let metric = self.metrics.get_mut(name)?;
        if metric.is_completed() {
            return None;
        }

        let elapsed_ms = metric.start.elapsed().as_secs_f64() * 1000.0;
        metric.duration_ms = Some(elapsed_ms);
        let completed = metric.clone();
        debug!("[timing] {}: {:.2}ms", name, elapsed_ms);

        self.record_metric(name, elapsed_ms);
        self.notify(&completed);
        Some(completed)
    }

    // == Samples ==
    /// Adds a duration sample for `name` without touching start/end state.
    pub fn record_metric(&mut self, name: &str, value_ms: f64) {
        let samples = self.samples.entry(name.to_string()).or_default();
        if samples.len() == MAX_SAMPLES_PER_NAME {
            samples.pop_front();
        }
        samples.push_back(value_ms);
    }

    /// Summary of every sample recorded under `name`.
    pub fn get_metric_stats(&self, name: &str) -> Option<PerformanceReport> {
        let samples = self.samples.get(name)?;
        PerformanceReport::from_durations(samples.iter().copied().collect())
    }

    /// Per-name summaries, ordered by name.
    pub fn get_all_stats(&self) -> BTreeMap<String, PerformanceReport> {
        self.samples
            .iter()
            .filter_map(|(name, samples)| {
                PerformanceReport::from_durations(samples.iter().copied().collect())
                    .map(|report| (name.clone(), report))
            })
            .collect()
    }

    fn notify(&self, metric: &PerformanceMetric) {
        for (id, observer) in &self.observers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(metric)));
            if outcome.is_err() {
                warn!(
                    "Performance observer {:?} panicked while handling '{}'",
                    id, metric.name
                );
            }
        }
    }

    // == Observers ==
    /// Registers a callback run for every completed metric.
    pub fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(&PerformanceMetric) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unregisters an observer. Returns whether it was registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    // == Queries ==
    pub fn get_metric(&self, name: &str) -> Option<&PerformanceMetric> {
        self.metrics.get(name)
    }

    /// All metrics, running ones included, ordered by name.
    pub fn get_all_metrics(&self) -> Vec<&PerformanceMetric> {
        let mut metrics: Vec<&PerformanceMetric> = self.metrics.values().collect();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        metrics
    }

    // == Report ==
    /// Summary over completed metrics only. None if nothing has completed.
    pub fn get_report(&self) -> Option<PerformanceReport> {
        let durations = self
            .metrics
            .values()
            .filter_map(|metric| metric.duration_ms)
            .collect();
        PerformanceReport::from_durations(durations)
    }

    /// Drops every metric and sample. Observers stay registered.
    pub fn clear(&mut self) {
        self.metrics.clear();
        self.samples.clear();
    }
}
