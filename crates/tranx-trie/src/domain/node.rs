use super::{
    nibbles::Nibbles,
    rlp::{self, EMPTY_STRING_CODE},
    Hash, EMPTY_TRIE_ROOT, HASH_REFERENCE_THRESHOLD,
};

// =============================================================================
// TRIE NODE: The four node types in MPT
// =============================================================================

/// Node types in the Patricia Merkle Trie.
///
/// Per Ethereum Yellow Paper Appendix D, there are four node types:
/// - Empty (null reference)
/// - Leaf (remaining path + value)
/// - Extension (shared prefix + single child)
/// - Branch (16 children + optional value)
///
/// Children are owned in memory. When a node is encoded, a child whose RLP
/// is shorter than 32 bytes is embedded verbatim; larger children are
/// referenced by their Keccak256 hash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TrieNode {
    /// Empty node (null reference, hash = EMPTY_TRIE_ROOT).
    #[default]
    Empty,

    /// Leaf node: stores remaining key path and the value.
    /// RLP: [hex_prefix_encode(path, true), value]
    Leaf {
        /// Remaining path from current position to this leaf.
        path: Nibbles,
        /// Stored value (an encoded transaction in the transaction trie).
        value: Vec<u8>,
    },

    /// Extension node: shared prefix optimization.
    /// RLP: [hex_prefix_encode(path, false), child_reference]
    Extension {
        /// Shared prefix path.
        path: Nibbles,
        /// The single child, always a branch in a well-formed trie.
        child: Box<TrieNode>,
    },

    /// Branch node: 16-way branch for each nibble value.
    /// RLP: \[child\[0\], ..., child\[15\], value\]
    Branch {
        /// 16 children (Empty = no child).
        children: Box<[TrieNode; 16]>,
        /// Optional value if a key terminates at this branch.
        value: Option<Vec<u8>>,
    },
}

impl TrieNode {
    pub fn is_empty(&self) -> bool {
        matches!(self, TrieNode::Empty)
    }

    /// RLP-encode this node.
    pub fn rlp_encode(&self) -> Vec<u8> {
        match self {
            TrieNode::Empty => vec![EMPTY_STRING_CODE],

            TrieNode::Leaf { path, value } => rlp::encode_list(&[
                rlp::encode_bytes(&path.encode_hex_prefix(true)),
                rlp::encode_bytes(value),
            ]),

            TrieNode::Extension { path, child } => rlp::encode_list(&[
                rlp::encode_bytes(&path.encode_hex_prefix(false)),
                child.reference(),
            ]),

            TrieNode::Branch { children, value } => {
                let mut items: Vec<Vec<u8>> = Vec::with_capacity(17);
                for child in children.iter() {
                    items.push(child.reference());
                }
                match value {
                    Some(v) => items.push(rlp::encode_bytes(v)),
                    None => items.push(vec![EMPTY_STRING_CODE]),
                }
                rlp::encode_list(&items)
            }
        }
    }

    /// How a parent refers to this node: the RLP itself when short,
    /// otherwise the RLP string of its hash.
    pub fn reference(&self) -> Vec<u8> {
        let encoded = self.rlp_encode();
        if encoded.len() < HASH_REFERENCE_THRESHOLD {
            encoded
        } else {
            rlp::encode_bytes(&rlp::keccak256(&encoded))
        }
    }

    /// Compute Keccak256 hash of RLP-encoded node.
    ///
    /// The root is always hashed, even when its encoding is short.
    pub fn hash(&self) -> Hash {
        if self.is_empty() {
            return EMPTY_TRIE_ROOT;
        }
        rlp::keccak256(&self.rlp_encode())
    }

    /// Insert `value` at the nibble `path` below this node, returning the
    /// replacement node.
    pub fn insert(self, path: &[u8], value: Vec<u8>) -> TrieNode {
        match self {
            TrieNode::Empty => TrieNode::Leaf {
                path: Nibbles(path.to_vec()),
                value,
            },

            TrieNode::Leaf {
                path: leaf_path,
                value: leaf_value,
            } => {
                let common = leaf_path.common_prefix_len(path);
                if common == leaf_path.len() && common == path.len() {
                    return TrieNode::Leaf {
                        path: leaf_path,
                        value,
                    };
                }

                let mut children = empty_children();
                let mut branch_value = None;

                if common == leaf_path.len() {
                    branch_value = Some(leaf_value);
                } else {
                    children[leaf_path.at(common) as usize] = TrieNode::Leaf {
                        path: leaf_path.slice(common + 1),
                        value: leaf_value,
                    };
                }
                place(&mut children, &mut branch_value, &path[common..], value);

                wrap_in_extension(
                    &path[..common],
                    TrieNode::Branch {
                        children,
                        value: branch_value,
                    },
                )
            }

            TrieNode::Extension {
                path: ext_path,
                child,
            } => {
                let common = ext_path.common_prefix_len(path);
                if common == ext_path.len() {
                    return TrieNode::Extension {
                        path: ext_path,
                        child: Box::new((*child).insert(&path[common..], value)),
                    };
                }

                // Split: the extension diverges from the new key at `common`
                let mut children = empty_children();
                let mut branch_value = None;

                let remainder = ext_path.slice(common + 1);
                children[ext_path.at(common) as usize] = if remainder.is_empty() {
                    *child
                } else {
                    TrieNode::Extension {
                        path: remainder,
                        child,
                    }
                };
                place(&mut children, &mut branch_value, &path[common..], value);

                wrap_in_extension(
                    &path[..common],
                    TrieNode::Branch {
                        children,
                        value: branch_value,
                    },
                )
            }

            TrieNode::Branch {
                mut children,
                value: branch_value,
            } => match path.split_first() {
                None => TrieNode::Branch {
                    children,
                    value: Some(value),
                },
                Some((&nibble, rest)) => {
                    let slot = &mut children[nibble as usize];
                    *slot = std::mem::take(slot).insert(rest, value);
                    TrieNode::Branch {
                        children,
                        value: branch_value,
                    }
                }
            },
        }
    }

    /// Look up the value stored at the nibble `path` below this node.
    pub fn get(&self, path: &[u8]) -> Option<&[u8]> {
        let mut node = self;
        let mut path = path;

        loop {
            match node {
                TrieNode::Empty => return None,
                TrieNode::Leaf {
                    path: leaf_path,
                    value,
                } => {
                    return (leaf_path.as_slice() == path).then_some(value.as_slice());
                }
                TrieNode::Extension {
                    path: ext_path,
                    child,
                } => {
                    path = path.strip_prefix(ext_path.as_slice())?;
                    node = &**child;
                }
                TrieNode::Branch { children, value } => match path.split_first() {
                    None => return value.as_deref(),
                    Some((&nibble, rest)) => {
                        node = &children[nibble as usize];
                        path = rest;
                    }
                },
            }
        }
    }

    /// Step one node along `key` during proof traversal.
    ///
    /// Returns `Some(next)` to continue traversal, or `None` to stop.
    pub fn next_on_path(&self, key: &Nibbles, depth: &mut usize) -> Option<&TrieNode> {
        match self {
            TrieNode::Empty => None,

            TrieNode::Leaf { .. } => None, // Stop at leaf

            TrieNode::Extension { path, child } => {
                if !key.as_slice()[*depth..].starts_with(path.as_slice()) {
                    return None; // Path diverges
                }
                *depth += path.len();
                Some(&**child)
            }

            TrieNode::Branch { children, .. } => {
                if *depth >= key.len() {
                    return None; // Key terminates at this branch
                }
                let child = &children[key.at(*depth) as usize];
                *depth += 1;
                (!child.is_empty()).then_some(child)
            }
        }
    }
}

fn empty_children() -> Box<[TrieNode; 16]> {
    Box::new(std::array::from_fn(|_| TrieNode::Empty))
}

/// Hang `value` off a fresh branch at `path` (relative to the branch).
fn place(
    children: &mut [TrieNode; 16],
    branch_value: &mut Option<Vec<u8>>,
    path: &[u8],
    value: Vec<u8>,
) {
    match path.split_first() {
        None => *branch_value = Some(value),
        Some((&nibble, rest)) => {
            children[nibble as usize] = TrieNode::Leaf {
                path: Nibbles(rest.to_vec()),
                value,
            };
        }
    }
}

fn wrap_in_extension(prefix: &[u8], node: TrieNode) -> TrieNode {
    if prefix.is_empty() {
        node
    } else {
        TrieNode::Extension {
            path: Nibbles(prefix.to_vec()),
            child: Box::new(node),
        }
    }
}
