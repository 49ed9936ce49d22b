//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// Represents a single cache entry with its payload and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value (opaque to the cache)
    pub value: V,
    /// Insertion timestamp (clock milliseconds)
    pub inserted_at: u64,
    /// Time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Position in insertion order
    pub(crate) seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, inserted_at: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            inserted_at,
            ttl_ms,
            seq: 0,
        }
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived its TTL at `now_ms`.
    ///
    /// Stale means strictly older than the TTL: an entry exactly `ttl_ms`
    /// old is still served.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.ttl_ms
    }

    // == Age ==
    /// Milliseconds since insertion. A clock reading earlier than the
    /// insertion time counts as age zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.inserted_at)
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds, `0` once stale.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.ttl_ms.saturating_sub(self.age_ms(now_ms))
    }
}
