//! # Patricia Trie Adapter
//!
//! Plugs `tranx_trie::PatriciaMerkleTrie` into the `TrieService` port.

use tranx_trie::{PatriciaMerkleTrie, Proof, TrieConfig, TrieError};

use crate::domain::ProofConfig;
use crate::ports::{TrieFactory, TrieService};

impl TrieService for PatriciaMerkleTrie {
    type Error = TrieError;

    fn put(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), TrieError> {
        PatriciaMerkleTrie::put(self, key, value)
    }

    fn prove(&self, key: &[u8]) -> (Proof, bool) {
        PatriciaMerkleTrie::prove(self, key)
    }
}

/// Creates an empty Patricia trie per request.
#[derive(Debug, Clone, Default)]
pub struct PatriciaTrieFactory {
    config: TrieConfig,
}

impl PatriciaTrieFactory {
    pub fn new(config: TrieConfig) -> Self {
        Self { config }
    }

    /// Factory matching the service configuration.
    pub fn from_config(config: &ProofConfig) -> Self {
        Self::new(TrieConfig {
            strict_key_order: config.strict_key_order,
            ..TrieConfig::default()
        })
    }
}

impl TrieFactory for PatriciaTrieFactory {
    type Trie = PatriciaMerkleTrie;

    fn create(&self) -> PatriciaMerkleTrie {
        PatriciaMerkleTrie::with_config(self.config.clone())
    }
}
