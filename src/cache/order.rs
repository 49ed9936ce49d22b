//! Insertion Order Module
//!
//! Tracks the order in which keys were inserted for FIFO eviction.

use std::collections::BTreeMap;

// == Insertion Order ==
/// Tracks insertion order for capacity eviction.
///
/// Every insertion receives a strictly increasing sequence number, so the
/// smallest live sequence is always the oldest-inserted key. Reads never
/// touch this tracker.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    /// Sequence number -> key, oldest first
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Records `key` as the newest insertion and returns its sequence number.
    pub fn push(&mut self, key: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.to_string());
        seq
    }

    // == Remove ==
    /// Forgets the insertion with sequence number `seq`.
    pub fn remove(&mut self, seq: u64) {
        self.order.remove(&seq);
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest-inserted key.
    ///
    /// Returns None if tracker is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    // == Keys ==
    /// Iterates keys from oldest to newest insertion.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.values()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
