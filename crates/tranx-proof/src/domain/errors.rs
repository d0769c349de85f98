//! # Domain Errors
//!
//! Error types for transaction proof generation.

use thiserror::Error;
use tranx_trie::VerifyError;

/// Errors that can occur while building or checking a transaction proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The trie rejected a put; the request was aborted at this index.
    #[error("Trie insertion failed at index {index} (key {key}): {reason}")]
    Insertion {
        index: u64,
        key: String,
        reason: String,
    },

    /// The proof result carries no proof because its build was aborted.
    #[error("Proof was aborted and carries no nodes")]
    Aborted,

    /// The proof does not verify against the given root.
    #[error("Proof verification failed: {0}")]
    Verification(#[from] VerifyError),
}

impl ProofError {
    /// Create an insertion error from the trie's own error.
    pub fn insertion(index: u64, key: &[u8], reason: impl std::fmt::Display) -> Self {
        Self::Insertion {
            index,
            key: hex::encode(key),
            reason: reason.to_string(),
        }
    }
}
