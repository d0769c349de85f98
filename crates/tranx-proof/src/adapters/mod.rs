//! # Adapters Layer
//!
//! Concrete implementations behind the outbound ports: the Patricia trie,
//! the transaction RLP encoder and the scratch buffer pool.

pub mod buffer_pool;
pub mod patricia_trie;
pub mod rlp_encoder;

pub use buffer_pool::{EncodeBufferPool, PooledBuffer, GLOBAL_BUFFER_POOL};
pub use patricia_trie::PatriciaTrieFactory;
pub use rlp_encoder::{encode_for_derive, encode_transaction};
