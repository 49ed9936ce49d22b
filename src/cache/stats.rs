//! Cache counters.
//!
//! The store reports what happened as [`CacheEvent`]s; [`CacheStats`] folds
//! them into counters and is handed out as a snapshot with the current size.

use serde::Serialize;

/// Something the store did that is worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// A read returned a fresh value
    Hit,
    /// A read found nothing, or found a stale entry
    Miss,
    /// A new key at capacity pushed out the oldest insertion
    Evicted,
    /// Stale entries dropped, lazily or by a sweep
    Expired(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Entries held when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: CacheEvent) {
        match event {
            CacheEvent::Hit => self.hits += 1,
            CacheEvent::Miss => self.misses += 1,
            CacheEvent::Evicted => self.evictions += 1,
            CacheEvent::Expired(count) => self.expirations += count as u64,
        }
    }

    /// Reads counted so far, hits and misses together.
    pub fn reads(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of reads that hit, 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.reads() {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    /// Copy of the counters stamped with the store's current size.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}
