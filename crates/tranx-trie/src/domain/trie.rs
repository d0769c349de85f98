use super::{
    nibbles::Nibbles, Hash, Proof, TrieConfig, TrieError, TrieNode, HASH_REFERENCE_THRESHOLD,
};

/// In-memory Patricia Merkle Trie.
///
/// Byte-compatible with Ethereum's trie: identical key/value sets produce
/// identical roots and identical proof nodes. Only insertion and proof
/// extraction are supported; deletion is not.
#[derive(Clone, Debug, Default)]
pub struct PatriciaMerkleTrie {
    root: TrieNode,
    len: usize,
    last_key: Option<Vec<u8>>,
    config: TrieConfig,
}

impl PatriciaMerkleTrie {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            root: TrieNode::Empty,
            len: 0,
            last_key: None,
            config,
        }
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Root hash; `EMPTY_TRIE_ROOT` for an empty trie.
    pub fn root_hash(&self) -> Hash {
        self.root.hash()
    }

    /// Insert `value` under `key`, overwriting any existing value.
    ///
    /// ## Errors
    ///
    /// - `EmptyValue`: an empty value would mean deletion, which is unsupported
    /// - `KeyTooLong`: key exceeds `max_key_len`
    /// - `UnorderedKey`: `strict_key_order` is set and `key` does not ascend
    pub fn put(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), TrieError> {
        if value.is_empty() {
            return Err(TrieError::EmptyValue {
                key: hex::encode(key),
            });
        }
        if key.len() > self.config.max_key_len {
            return Err(TrieError::KeyTooLong {
                max: self.config.max_key_len,
                len: key.len(),
            });
        }
        if self.config.strict_key_order {
            if let Some(previous) = &self.last_key {
                if key <= previous.as_slice() {
                    return Err(TrieError::UnorderedKey {
                        key: hex::encode(key),
                        previous: hex::encode(previous),
                    });
                }
            }
        }

        let path = Nibbles::from_bytes(key);
        if self.root.get(path.as_slice()).is_none() {
            self.len += 1;
        }
        self.root = std::mem::take(&mut self.root).insert(path.as_slice(), value);

        match &mut self.last_key {
            Some(last) => {
                last.clear();
                last.extend_from_slice(key);
            }
            None => self.last_key = Some(key.to_vec()),
        }
        Ok(())
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.root.get(Nibbles::from_bytes(key).as_slice())
    }

    /// Build the proof for `key`.
    ///
    /// Returns the nodes on the path from the root towards `key` and whether
    /// a value is stored under `key`. When the key is absent the nodes still
    /// form a valid exclusion proof.
    pub fn prove(&self, key: &[u8]) -> (Proof, bool) {
        let path = Nibbles::from_bytes(key);
        let mut nodes = Vec::new();
        let mut depth = 0;
        let mut current = Some(&self.root);

        while let Some(node) = current {
            if node.is_empty() {
                break;
            }
            let encoded = node.rlp_encode();
            // Short non-root nodes travel embedded in their parent
            if nodes.is_empty() || encoded.len() >= HASH_REFERENCE_THRESHOLD {
                nodes.push(encoded);
            }
            current = node.next_on_path(&path, &mut depth);
        }

        let found = self.root.get(path.as_slice()).is_some();
        (Proof::new(nodes), found)
    }
}
