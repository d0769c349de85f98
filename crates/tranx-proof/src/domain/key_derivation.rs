//! # Index Key Derivation
//!
//! Trie keys and insertion order for a block's transaction list.
//!
//! ## Key Encoding
//!
//! A transaction at index `i` is stored under the RLP encoding of `i`:
//!
//! | Index | Key |
//! |-------|-----|
//! | 0 | `0x80` (RLP empty string) |
//! | 1..=127 | single byte `i` |
//! | >= 128 | `0x80 + len` followed by big-endian bytes |
//!
//! ## Insertion Order
//!
//! Indices are inserted in three phases:
//!
//! ```text
//! 1. 1 ..= min(N-1, 127)   keys 0x01..0x7f
//! 2. 0                     key  0x80
//! 3. 128 .. N              keys 0x81 0x80 ..
//! ```
//!
//! This is the ascending byte order of the encoded keys, which is what an
//! ordered trie builder consumes. Plain `0..N` order is not.

use std::ops::Range;
use tranx_trie::rlp;

/// Largest index whose key is a single byte.
pub const SINGLE_BYTE_KEY_MAX: u64 = 0x7f;

/// First index that sorts after index 0.
const HIGH_PHASE_START: u64 = SINGLE_BYTE_KEY_MAX + 1;

/// Trie key for transaction `index`.
pub fn index_key(index: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    append_index_key(&mut key, index);
    key
}

/// Append the trie key for `index` to `buf`.
///
/// Zero takes the codec's own zero representation, so it lands on `0x80`.
pub fn append_index_key(buf: &mut Vec<u8>, index: u64) {
    rlp::append_uint64(buf, index);
}

/// The three index ranges of the insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPhases {
    /// `1 ..= min(N-1, 127)`.
    pub low: Range<u64>,
    /// `Some(0)` when the list is non-empty.
    pub zero: Option<u64>,
    /// `128 .. N`.
    pub high: Range<u64>,
}

/// Split `count` indices into their insertion phases.
pub fn insertion_phases(count: u64) -> InsertionPhases {
    InsertionPhases {
        low: 1..count.clamp(1, HIGH_PHASE_START),
        zero: (count > 0).then_some(0),
        high: HIGH_PHASE_START..count.max(HIGH_PHASE_START),
    }
}

/// Insertion order for a list of `count` transactions.
pub fn insertion_order(count: u64) -> InsertionOrder {
    InsertionOrder {
        phases: insertion_phases(count),
    }
}

/// Iterator over indices in insertion order.
#[derive(Debug, Clone)]
pub struct InsertionOrder {
    phases: InsertionPhases,
}

impl InsertionOrder {
    fn remaining(&self) -> u64 {
        let InsertionPhases { low, zero, high } = &self.phases;
        (low.end - low.start) + zero.is_some() as u64 + (high.end - high.start)
    }
}

impl Iterator for InsertionOrder {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let phases = &mut self.phases;
        phases
            .low
            .next()
            .or_else(|| phases.zero.take())
            .or_else(|| phases.high.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for InsertionOrder {}

impl std::iter::FusedIterator for InsertionOrder {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_key_boundaries() {
        assert_eq!(index_key(0), vec![0x80]);
        assert_eq!(index_key(1), vec![0x01]);
        assert_eq!(index_key(127), vec![0x7f]);
        assert_eq!(index_key(128), vec![0x81, 0x80]);
        assert_eq!(index_key(255), vec![0x81, 0xff]);
        assert_eq!(index_key(256), vec![0x82, 0x01, 0x00]);
        assert_eq!(index_key(0x0102_0304), vec![0x84, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_zero_key_is_rlp_empty_string() {
        assert_eq!(index_key(0), rlp::encode_bytes(&[]));
    }

    #[test]
    fn test_append_keeps_prefix() {
        let mut buf = vec![0xAA];
        append_index_key(&mut buf, 300);
        assert_eq!(buf, vec![0xAA, 0x82, 0x01, 0x2c]);
    }

    #[test]
    fn test_order_empty() {
        assert_eq!(insertion_order(0).count(), 0);
        let phases = insertion_phases(0);
        assert!(phases.low.is_empty());
        assert_eq!(phases.zero, None);
        assert!(phases.high.is_empty());
    }

    #[test]
    fn test_order_small_lists() {
        assert_eq!(insertion_order(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(insertion_order(2).collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(insertion_order(3).collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn test_order_at_128() {
        let order: Vec<u64> = insertion_order(128).collect();
        assert_eq!(order.len(), 128);
        assert_eq!(order[0], 1);
        assert_eq!(order[126], 127);
        assert_eq!(order[127], 0);
    }

    #[test]
    fn test_order_at_129() {
        let order: Vec<u64> = insertion_order(129).collect();
        assert_eq!(order.len(), 129);
        assert_eq!(order[127], 0);
        assert_eq!(order[128], 128);
    }

    #[test]
    fn test_order_large() {
        let order: Vec<u64> = insertion_order(1000).collect();
        let mut expected: Vec<u64> = (1..128).collect();
        expected.push(0);
        expected.extend(128..1000);
        assert_eq!(order, expected);
    }

    #[test]
    fn test_phases_at_129() {
        let phases = insertion_phases(129);
        assert_eq!(phases.low, 1..128);
        assert_eq!(phases.zero, Some(0));
        assert_eq!(phases.high, 128..129);
    }

    #[test]
    fn test_exact_size_tracks_progress() {
        let mut order = insertion_order(130);
        assert_eq!(order.len(), 130);
        for _ in 0..127 {
            order.next();
        }
        assert_eq!(order.len(), 3);
        assert_eq!(order.next(), Some(0));
        assert_eq!(order.len(), 2);
        assert_eq!(order.by_ref().count(), 2);
        assert_eq!(order.next(), None);
    }

    #[test]
    fn test_order_sorts_keys_ascending() {
        let keys: Vec<Vec<u8>> = insertion_order(600).map(index_key).collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
