//! # Transaction Proofs (tranx-proof)
//!
//! Builds inclusion proofs for the transactions of a block. Every transaction
//! is inserted into a fresh Merkle Patricia trie under the RLP encoding of its
//! index, then the trie yields the node path for one target index.
//!
//! ## Request Flow
//!
//! ```text
//! get_transaction_proof(list, target)
//!        │
//!        ↓
//! [insertion_order(N)] ──i──→ index_key(i) ──→ encode into pooled scratch
//!                                                     │ copy out
//!                                                     ↓
//!                                         TrieService::put(key, value)
//!                                                     │ first failure aborts
//!                                                     ↓
//!                                         TrieService::prove(index_key(target))
//!                                                     │
//!                                                     ↓
//!                                     TransactionProof { proof, key, found }
//! ```
//!
//! ## Insertion Order
//!
//! | Phase | Indices | Keys |
//! |-------|---------|------|
//! | 1 | `1 ..= min(N-1, 127)` | `0x01 ..= 0x7f` |
//! | 2 | `0` | `0x80` |
//! | 3 | `128 .. N` | `0x81 0x80 ..` |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): Key derivation, proof results, config
//! - **Ports Layer** (`ports/`): Inbound API, outbound trie and list SPIs
//! - **Adapters Layer** (`adapters/`): Patricia trie, RLP encoder, buffer pool
//! - **Application Layer** (`application/`): The proof service
//!
//! ## Concurrency
//!
//! Each request builds its own trie on the calling thread. The scratch buffer
//! pool is the only shared mutable state and hands every buffer to one
//! request at a time.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{
    append_index_key, index_key, insertion_order, insertion_phases, BuildState, InsertionOrder,
    InsertionPhases, ProofConfig, ProofError, ProofStats, ProofStatsSnapshot, TransactionProof,
    SINGLE_BYTE_KEY_MAX,
};

pub use ports::{TransactionList, TransactionProofApi, TrieFactory, TrieService};

pub use adapters::{
    encode_for_derive, encode_transaction, EncodeBufferPool, PatriciaTrieFactory, PooledBuffer,
    GLOBAL_BUFFER_POOL,
};

pub use application::{get_transaction_proof, TransactionProofService};
