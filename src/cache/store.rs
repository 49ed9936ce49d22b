//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CacheEvent, CacheStats, Clock, InsertionOrder, SystemClock};

// == Cache Store ==
/// Bounded key-value store with per-entry TTL and insertion-order eviction.
///
/// None of the operations fail. A miss means "go fetch the value", never an
/// error. Reads do not refresh an entry's position: once full, the
/// oldest-inserted key is evicted regardless of how often it was read.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order tracker
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in milliseconds for entries set without one
    default_ttl_ms: u64,
    /// Time source for staleness checks
    clock: Arc<dyn Clock>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore backed by the monotonic system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries (raised to 1 if zero)
    /// * `default_ttl_ms` - TTL in milliseconds for entries set without one
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self::with_clock(max_entries, default_ttl_ms, Arc::new(SystemClock::new()))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            default_ttl_ms,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any existing entry.
    ///
    /// An overwrite replaces the value and TTL and resets the insertion time,
    /// but keeps the key's original position in the eviction order. A new key
    /// arriving at capacity first evicts the single oldest-inserted entry.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_ms` - Optional TTL in milliseconds (uses default_ttl_ms if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        let key = key.into();
        let ttl_ms = ttl_ms.unwrap_or(self.default_ttl_ms);
        let now = self.clock.now_ms();

        if let Some(existing) = self.entries.get_mut(&key) {
            existing.value = value;
            existing.inserted_at = now;
            existing.ttl_ms = ttl_ms;
            return;
        }

        if self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.order.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record(CacheEvent::Evicted);
                debug!("Cache full, evicted oldest key '{}'", evicted);
            }
        }

        let mut entry = CacheEntry::new(value, now, ttl_ms);
        entry.seq = self.order.push(&key);
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns the value under `key` if present and fresh.
    ///
    /// A stale entry is removed as a side effect and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();

        let stale = match self.entries.get(key) {
            Some(entry) => entry.is_stale(now),
            None => {
                self.stats.record(CacheEvent::Miss);
                return None;
            }
        };

        if stale {
            self.remove_stale(key);
            self.stats.record(CacheEvent::Miss);
            return None;
        }

        self.stats.record(CacheEvent::Hit);
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Returns whether a `get` for `key` would succeed right now.
    ///
    /// Applies the same lazy eviction as `get` but leaves hit/miss counters
    /// untouched.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();

        match self.entries.get(key).map(|entry| entry.is_stale(now)) {
            Some(false) => true,
            Some(true) => {
                self.remove_stale(key);
                false
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.order.remove(entry.seq);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry (e.g. on logout or tenant switch).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Keys ==
    /// Snapshot of the current keys in insertion order.
    ///
    /// No staleness check is made: stale entries not yet swept are listed.
    pub fn keys(&self) -> Vec<String> {
        self.order.keys().cloned().collect()
    }

    // == Cleanup ==
    /// Removes all stale entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let stale_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = stale_keys.len();
        for key in stale_keys {
            if let Some(entry) = self.entries.remove(&key) {
                self.order.remove(entry.seq);
            }
        }

        self.stats.record(CacheEvent::Expired(count));
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Remaining lifetime of `key` in milliseconds, without touching it.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_stale(now))
            .map(|entry| entry.ttl_remaining_ms(now))
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_stale(&mut self, key: &str) {
        if let Some(entry) = self.entries.remove(key) {
            self.order.remove(entry.seq);
            self.stats.record(CacheEvent::Expired(1));
            debug!("Lazily evicted stale key '{}'", key);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn store_with_clock(max_entries: usize, default_ttl_ms: u64) -> (CacheStore<String>, ManualClock) {
        let clock = ManualClock::new(0);
        let store = CacheStore::with_clock(max_entries, default_ttl_ms, Arc::new(clock.clone()));
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100, 300_000);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
        assert_eq!(store.default_ttl_ms(), 300_000);
    }

    #[test]
    fn test_store_zero_capacity_is_raised() {
        let mut store: CacheStore<u32> = CacheStore::new(0, 1_000);
        store.set("a", 1, None);
        store.set("b", 2, None);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(&2));
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100, 1_000);

        store.set("orders:page=1", "rows".to_string(), None);

        assert_eq!(store.get("orders:page=1").map(String::as_str), Some("rows"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100, 1_000);
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_stale_get_evicts() {
        let (mut store, clock) = store_with_clock(100, 1_000);

        store.set("k", "v".to_string(), Some(100));
        clock.advance(100);
        assert!(store.get("k").is_some(), "exactly ttl old is still fresh");

        clock.advance(1);
        assert!(store.get("k").is_none());
        assert_eq!(store.len(), 0, "stale entry removed on read");
        assert!(!store.has("k"));

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_has_evicts_stale() {
        let (mut store, clock) = store_with_clock(100, 50);

        store.set("k", "v".to_string(), None);
        assert!(store.has("k"));

        clock.advance(51);
        assert!(!store.has("k"));
        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_has_does_not_count_reads() {
        let (mut store, _) = store_with_clock(100, 1_000);
        store.set("k", "v".to_string(), None);

        store.has("k");
        store.has("missing");

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_store_delete() {
        let (mut store, _) = store_with_clock(100, 1_000);

        store.set("key1", "value1".to_string(), None);

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, _) = store_with_clock(100, 1_000);

        store.set("key1", "value1".to_string(), None);
        store.set("key1", "value2".to_string(), None);

        assert_eq!(store.get("key1").map(String::as_str), Some("value2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys(), vec!["key1".to_string()]);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let (mut store, clock) = store_with_clock(100, 100);

        store.set("k", "old".to_string(), None);
        clock.advance(80);
        store.set("k", "new".to_string(), None);
        clock.advance(80);

        assert_eq!(store.get("k").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_store_fifo_eviction() {
        let (mut store, _) = store_with_clock(3, 1_000);

        store.set("key1", "value1".to_string(), None);
        store.set("key2", "value2".to_string(), None);
        store.set("key3", "value3".to_string(), None);

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4", "value4".to_string(), None);

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_reads_do_not_protect_from_eviction() {
        let (mut store, _) = store_with_clock(3, 1_000);

        store.set("key1", "value1".to_string(), None);
        store.set("key2", "value2".to_string(), None);
        store.set("key3", "value3".to_string(), None);

        // Reading key1 does not refresh its position
        store.get("key1");
        store.get("key1");

        store.set("key4", "value4".to_string(), None);

        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let (mut store, _) = store_with_clock(2, 1_000);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.set("a", "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        // Overwriting keeps "a" in its original slot
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_store_overwritten_key_is_still_evicted_first() {
        let (mut store, _) = store_with_clock(2, 1_000);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.set("a", "3".to_string(), None);
        store.set("c", "4".to_string(), None);

        assert_eq!(store.keys(), vec!["b".to_string(), "c".to_string()]);
        assert!(!store.has("a"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_keys_insertion_order_includes_stale() {
        let (mut store, clock) = store_with_clock(10, 1_000);

        store.set("c", "1".to_string(), Some(10));
        store.set("a", "2".to_string(), None);
        store.set("b", "3".to_string(), None);
        clock.advance(20);

        assert_eq!(
            store.keys(),
            vec!["c".to_string(), "a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_store_clear() {
        let (mut store, _) = store_with_clock(10, 1_000);
        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);

        store.clear();

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_store_cleanup_removes_only_stale() {
        let (mut store, clock) = store_with_clock(100, 1_000);

        store.set("short", "1".to_string(), Some(10));
        store.set("long", "2".to_string(), Some(10_000));
        store.set("medium", "3".to_string(), Some(50));
        clock.advance(20);

        let removed = store.cleanup();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.keys(), vec!["long".to_string(), "medium".to_string()]);
        assert_eq!(store.get("long").map(String::as_str), Some("2"));
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_ttl_remaining() {
        let (mut store, clock) = store_with_clock(10, 1_000);
        store.set("k", "v".to_string(), None);
        clock.advance(400);

        assert_eq!(store.ttl_remaining_ms("k"), Some(600));
        assert_eq!(store.ttl_remaining_ms("missing"), None);
    }

    #[test]
    fn test_store_opaque_values() {
        let mut store: CacheStore<Vec<u64>> = CacheStore::new(10, 1_000);
        store.set("ids", vec![1, 2, 3], None);
        assert_eq!(store.get("ids"), Some(&vec![1, 2, 3]));
    }
}
