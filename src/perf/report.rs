//! Performance Report
//!
//! Summary statistics over completed timings.

use serde::Serialize;

/// Summary over completed metric durations, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub count: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl PerformanceReport {
    /// Builds a report from durations in milliseconds.
    ///
    /// Returns None for an empty input.
    pub fn from_durations(mut durations: Vec<f64>) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        durations.sort_by(|a, b| a.total_cmp(b));
        let count = durations.len();
        let sum: f64 = durations.iter().sum();

        Some(Self {
            count,
            mean_ms: sum / count as f64,
            min_ms: durations[0],
            max_ms: durations[count - 1],
            median_ms: percentile(&durations, 0.5),
            p95_ms: percentile(&durations, 0.95),
            p99_ms: percentile(&durations, 0.99),
        })
    }
}

/// Value at `floor(len * p)` of an ascending, non-empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        assert!(PerformanceReport::from_durations(Vec::new()).is_none());
    }

    #[test]
    fn test_single_duration() {
        let report = PerformanceReport::from_durations(vec![4.0]).unwrap();
        assert_eq!(report.count, 1);
        assert_eq!(report.min_ms, 4.0);
        assert_eq!(report.max_ms, 4.0);
        assert_eq!(report.median_ms, 4.0);
        assert_eq!(report.p99_ms, 4.0);
    }

    #[test]
    fn test_report_statistics() {
        let durations: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let report = PerformanceReport::from_durations(durations).unwrap();

        assert_eq!(report.count, 100);
        assert_eq!(report.min_ms, 1.0);
        assert_eq!(report.max_ms, 100.0);
        assert!((report.mean_ms - 50.5).abs() < 1e-9);
        assert_eq!(report.median_ms, 51.0);
        assert_eq!(report.p95_ms, 96.0);
        assert_eq!(report.p99_ms, 100.0);
    }
}
