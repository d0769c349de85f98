use thiserror::Error;

/// Errors reported by trie mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    #[error("Empty value for key {key}: deletions are not supported")]
    EmptyValue { key: String },

    #[error("Key too long: max {max} bytes, got {len}")]
    KeyTooLong { max: usize, len: usize },

    #[error("Key {key} inserted out of order (previous key {previous})")]
    UnorderedKey { key: String, previous: String },
}

/// Errors raised while decoding RLP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("RLP input truncated")]
    Truncated,

    #[error("Non-canonical RLP encoding")]
    NonCanonical,

    #[error("Trailing bytes after RLP item")]
    TrailingBytes,

    #[error("Expected an RLP string, found a list")]
    UnexpectedList,

    #[error("Expected an RLP list, found a string")]
    UnexpectedString,
}

/// Errors during iterative proof verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("Proof too deep: {depth} nodes (max {max})")]
    ProofTooDeep { depth: usize, max: usize },

    #[error("Empty proof for a non-empty root")]
    EmptyProof,

    #[error("Proof ends before the key path is resolved")]
    MissingNode,

    #[error("Hash mismatch at proof node {index}")]
    HashMismatch { index: usize },

    #[error("Invalid trie node at proof node {index}")]
    InvalidNode { index: usize },

    #[error("Malformed RLP in proof: {0}")]
    Rlp(#[from] RlpError),

    #[error("{unused} proof nodes were not used")]
    TrailingNodes { unused: usize },
}
