//! # Iterative Proof Verification (Stack Safety)
//!
//! Loop-based inclusion proof verification.
//!
//! ## Threat
//!
//! A peer submits a proof with thousands of nodes, or nodes that point at
//! each other. Recursive verification blows the stack.
//!
//! ## Defense: Nibble-Walking Loop
//!
//! Strictly iterative verification with a depth limit. Every hashed child
//! reference consumes exactly one proof node whose Keccak256 must match.

use super::{
    nibbles::Nibbles,
    rlp::{self, EMPTY_STRING_CODE},
    Hash, Proof, VerifyError, EMPTY_TRIE_ROOT, MAX_PROOF_DEPTH,
};

/// How the walk reaches the next node.
#[derive(Clone, Copy)]
enum NodeRef<'a> {
    /// Next proof node, which must hash to this value.
    Hashed(Hash),
    /// Node embedded verbatim in its parent.
    Embedded(&'a [u8]),
}

/// Verify `proof` for `key` against `root`.
///
/// ## Returns
///
/// - `Ok(Some(value))`: the proof shows `key` maps to `value`
/// - `Ok(None)`: the proof shows `key` is absent
/// - `Err(_)`: the proof is malformed or does not match `root`
///
/// ## Algorithm: Nibble-Walking Loop
///
/// 1. Check depth limit (MAX_PROOF_DEPTH)
/// 2. Convert key to nibbles
/// 3. Walk nodes, checking each hashed reference
/// 4. Stop at a leaf, a diverging path or an empty slot
pub fn verify_proof(
    root: &Hash,
    key: &[u8],
    proof: &Proof,
) -> Result<Option<Vec<u8>>, VerifyError> {
    if proof.len() > MAX_PROOF_DEPTH {
        return Err(VerifyError::ProofTooDeep {
            depth: proof.len(),
            max: MAX_PROOF_DEPTH,
        });
    }

    if proof.is_empty() {
        return if *root == EMPTY_TRIE_ROOT {
            Ok(None)
        } else {
            Err(VerifyError::EmptyProof)
        };
    }

    let key_nibbles = Nibbles::from_bytes(key);
    let nodes = proof.nodes();
    let mut consumed = 0;
    let mut nibble_idx = 0;
    let mut next = NodeRef::Hashed(*root);

    // Bounded: every iteration consumes a proof node or a key nibble
    let outcome = loop {
        let (index, node_bytes) = match next {
            NodeRef::Hashed(expected) => {
                let node_bytes = nodes.get(consumed).ok_or(VerifyError::MissingNode)?;
                if rlp::keccak256(node_bytes) != expected {
                    return Err(VerifyError::HashMismatch { index: consumed });
                }
                consumed += 1;
                (consumed - 1, node_bytes.as_slice())
            }
            NodeRef::Embedded(bytes) => (consumed.saturating_sub(1), bytes),
        };

        let items = rlp::decode_list(node_bytes)?;
        match items.len() {
            2 => {
                let encoded_path = rlp::decode_bytes(items[0])?;
                let (path, is_leaf) = Nibbles::decode_hex_prefix(encoded_path)
                    .ok_or(VerifyError::InvalidNode { index })?;
                let remaining = &key_nibbles.as_slice()[nibble_idx..];

                if is_leaf {
                    if path.as_slice() == remaining {
                        break Some(rlp::decode_bytes(items[1])?.to_vec());
                    }
                    break None;
                }

                if path.is_empty() {
                    return Err(VerifyError::InvalidNode { index });
                }
                if !remaining.starts_with(path.as_slice()) {
                    break None;
                }
                nibble_idx += path.len();
                next = child_ref(items[1], index)?.ok_or(VerifyError::InvalidNode { index })?;
            }
            17 => {
                if nibble_idx == key_nibbles.len() {
                    let value = rlp::decode_bytes(items[16])?;
                    break (!value.is_empty()).then(|| value.to_vec());
                }
                let nibble = key_nibbles.at(nibble_idx) as usize;
                nibble_idx += 1;
                match child_ref(items[nibble], index)? {
                    Some(child) => next = child,
                    None => break None,
                }
            }
            _ => return Err(VerifyError::InvalidNode { index }),
        }
    };

    if consumed < nodes.len() {
        return Err(VerifyError::TrailingNodes {
            unused: nodes.len() - consumed,
        });
    }
    Ok(outcome)
}

/// Decode a child slot: empty, embedded node or 32-byte hash.
fn child_ref(item: &[u8], index: usize) -> Result<Option<NodeRef<'_>>, VerifyError> {
    if rlp::is_list(item) {
        return Ok(Some(NodeRef::Embedded(item)));
    }
    if item == [EMPTY_STRING_CODE] {
        return Ok(None);
    }
    let bytes = rlp::decode_bytes(item)?;
    let hash: Hash = bytes
        .try_into()
        .map_err(|_| VerifyError::InvalidNode { index })?;
    Ok(Some(NodeRef::Hashed(hash)))
}
