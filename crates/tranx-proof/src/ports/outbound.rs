//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the proof builder: a keyed trie, a source of fresh
//! tries, and the transaction container that encodes each entry.

use tranx_trie::Proof;

/// Abstract interface for a key/value trie that can produce proofs.
pub trait TrieService {
    /// Error returned when the trie rejects a put.
    type Error: std::error::Error;

    /// Insert `value` under `key`.
    fn put(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), Self::Error>;

    /// Nodes on the path to `key` and whether a value is stored there.
    fn prove(&self, key: &[u8]) -> (Proof, bool);
}

/// Source of empty tries, one per proof request.
pub trait TrieFactory: Send + Sync {
    type Trie: TrieService;

    fn create(&self) -> Self::Trie;
}

impl<F, T> TrieFactory for F
where
    F: Fn() -> T + Send + Sync,
    T: TrieService,
{
    type Trie = T;

    fn create(&self) -> T {
        self()
    }
}

/// Abstract interface for the ordered transactions of a block.
///
/// Entries are addressed by their position; `encode_index` is only called
/// with `index < len()`.
pub trait TransactionList {
    /// Number of transactions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the canonical encoding of transaction `index` to `buf`.
    fn encode_index(&self, index: usize, buf: &mut Vec<u8>);
}
