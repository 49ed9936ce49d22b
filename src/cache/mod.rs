//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and insertion-order eviction.

mod clock;
mod entry;
mod key;
mod order;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{generate_cache_key, generate_page_cache_key};
pub use order::InsertionOrder;
pub use stats::{CacheEvent, CacheStats};
pub use store::CacheStore;

// == Public Constants ==
/// Default entry lifetime: five minutes
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default interval between cleanup sweeps: one minute
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 60 * 1000;
