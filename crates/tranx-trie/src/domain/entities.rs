//! # Trie Constants and Configuration
//!
//! ## Type Decisions
//!
//! - `Hash = [u8; 32]` - Keccak256 output, used for node references and roots.
//! - Keys are raw byte strings; the transaction trie keys by RLP-encoded
//!   indices, which are at most 9 bytes long.

use serde::{Deserialize, Serialize};

pub type Hash = [u8; 32];

/// Keccak256 hash of an empty RLP-encoded trie.
/// Root of a trie with no entries.
/// Value: keccak256(RLP("")) = 0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421
pub const EMPTY_TRIE_ROOT: Hash = [
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6, 0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0, 0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
];

/// Encoded nodes at least this long are referenced by hash instead of
/// being embedded in their parent.
pub const HASH_REFERENCE_THRESHOLD: usize = 32;

/// Default maximum key length in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = 32;

/// Maximum number of nodes accepted in a proof.
///
/// A key of `DEFAULT_MAX_KEY_LEN` bytes has 64 nibbles; each nibble can cost
/// at most one node, plus the terminating leaf.
pub const MAX_PROOF_DEPTH: usize = DEFAULT_MAX_KEY_LEN * 2 + 1;

/// Configuration for a Patricia Merkle Trie instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Reject any key that is not strictly greater than the previously
    /// inserted key (default: false).
    pub strict_key_order: bool,
    /// Maximum key length in bytes (default: 32).
    pub max_key_len: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            strict_key_order: false,
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }
}

impl TrieConfig {
    /// Configuration for ordered insertion (keys must ascend).
    pub fn ordered() -> Self {
        Self {
            strict_key_order: true,
            ..Default::default()
        }
    }
}
