//! # tranx-trie
//!
//! Ethereum-compatible Merkle Patricia Trie for Tranx.
//!
//! ## Role in System
//!
//! - **Trie Builder**: In-memory insert-only trie keyed by raw bytes
//! - **Root Commitment**: Keccak256 root identical to Ethereum's for the same key/value set
//! - **Proof Source**: Root-to-leaf node lists for inclusion and exclusion proofs
//! - **Proof Verifier**: Iterative, depth-bounded verification against a root
//!
//! ## Node Encoding
//!
//! ```text
//! Leaf       [hex_prefix(path, leaf), value]
//! Extension  [hex_prefix(path, ext), child_ref]
//! Branch     [child_ref x 16, value]
//!
//! child_ref = rlp(child)             if len(rlp(child)) < 32
//!           = rlp(keccak(rlp(child))) otherwise
//! ```
//!
//! ## Security
//!
//! - Proof verification is loop-based and rejects proofs deeper than `MAX_PROOF_DEPTH`
//! - RLP decoding rejects non-canonical and truncated input
//! - Strict key order mode turns out-of-order insertion into an error

pub mod domain;

pub use domain::*;
