//! # Inclusion Proof
//!
//! A proof is the list of RLP-encoded trie nodes met while walking from the
//! root towards a key. The root node is always present; any other node is
//! present only if its parent references it by hash (short nodes travel
//! embedded inside their parent's encoding).
//!
//! An empty proof is what an empty trie produces for every key.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Ordered trie nodes from root to the deepest node on a key's path.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// RLP-encoded trie nodes, root first.
    #[serde_as(as = "Vec<Hex>")]
    nodes: Vec<Vec<u8>>,
}

impl Proof {
    /// Create a proof from encoded nodes.
    pub fn new(nodes: Vec<Vec<u8>>) -> Self {
        Self { nodes }
    }

    /// Encoded nodes, root first.
    pub fn nodes(&self) -> &[Vec<u8>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total encoded size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.nodes.iter().map(Vec::len).sum()
    }

    pub fn into_nodes(self) -> Vec<Vec<u8>> {
        self.nodes
    }
}

impl From<Vec<Vec<u8>>> for Proof {
    fn from(nodes: Vec<Vec<u8>>) -> Self {
        Self::new(nodes)
    }
}
