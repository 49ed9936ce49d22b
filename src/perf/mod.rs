//! Performance Module
//!
//! Named start/stop timing with observers and summary reports, wrappers that
//! time a closure or future, debounce/throttle call wrappers and a debounced
//! search built on them.

mod measure;
mod rate_limit;
mod report;
mod search;
mod timer;

pub use measure::{measure_async, measure_sync, TimingGuard};
pub use rate_limit::{debounce, throttle, Debounce, Throttle};
pub use report::PerformanceReport;
pub use search::{debounced_search, DEFAULT_SEARCH_WAIT};
pub use timer::{ObserverId, PerformanceMetric, PerformanceTimer};
