pub mod entities;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod proofs;
pub mod rlp;
pub mod trie;
pub mod verify;

pub use entities::*;
pub use errors::*;
pub use nibbles::Nibbles;
pub use node::TrieNode;
pub use proofs::*;
pub use trie::*;
pub use verify::verify_proof;
