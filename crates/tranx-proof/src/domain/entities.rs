//! # Domain Entities
//!
//! Proof results, request lifecycle and service counters.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tranx_trie::{verify_proof, Hash, Proof};

use super::errors::ProofError;

/// Result of a transaction proof request.
///
/// An aborted build carries neither proof nor key. A completed build always
/// carries both, even when the target index is absent (`found = false`).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProof {
    /// Trie nodes from the root towards the target key.
    ///
    /// Only the root and hash-referenced nodes are listed. A node whose RLP
    /// is shorter than 32 bytes is embedded in its parent and has no entry of
    /// its own, so the list can be shorter than the path depth.
    pub proof: Option<Proof>,
    /// RLP-encoded target index.
    #[serde_as(as = "Option<Hex>")]
    pub key: Option<Vec<u8>>,
    /// Whether a transaction is stored under `key`.
    pub found: bool,
}

impl TransactionProof {
    /// Result of a completed build.
    pub fn new(proof: Proof, key: Vec<u8>, found: bool) -> Self {
        Self {
            proof: Some(proof),
            key: Some(key),
            found,
        }
    }

    /// Result of a build that stopped on an insertion failure.
    pub fn aborted() -> Self {
        Self::default()
    }

    pub fn is_aborted(&self) -> bool {
        self.proof.is_none()
    }

    /// Check this proof against a transactions root.
    ///
    /// Returns the encoded transaction for an inclusion proof and `None` for
    /// an exclusion proof.
    pub fn verify(&self, root: &Hash) -> Result<Option<Vec<u8>>, ProofError> {
        match (&self.proof, &self.key) {
            (Some(proof), Some(key)) => Ok(verify_proof(root, key, proof)?),
            _ => Err(ProofError::Aborted),
        }
    }
}

/// Lifecycle of a single proof request.
///
/// ```text
/// Created -> Populating -> Populated -> ProofExtracted
///                 |
///                 +-> PopulatingFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Created,
    Populating,
    PopulatingFailed,
    Populated,
    ProofExtracted,
}

impl BuildState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::PopulatingFailed | Self::ProofExtracted)
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(self, next: BuildState) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Populating)
                | (Self::Populating, Self::PopulatingFailed)
                | (Self::Populating, Self::Populated)
                | (Self::Populated, Self::ProofExtracted)
        )
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Populating => "populating",
            Self::PopulatingFailed => "populating_failed",
            Self::Populated => "populated",
            Self::ProofExtracted => "proof_extracted",
        };
        f.write_str(name)
    }
}

/// Thread-safe proof service counters.
#[derive(Debug, Default)]
pub struct ProofStats {
    /// Completed builds.
    pub proofs_generated: AtomicU64,
    /// Completed builds whose target was absent.
    pub not_found: AtomicU64,
    /// Builds aborted by an insertion failure.
    pub insertion_failures: AtomicU64,
    /// Transactions inserted across all builds.
    pub transactions_inserted: AtomicU64,
}

impl ProofStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_inserted(&self, count: u64) {
        self.transactions_inserted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_completed(&self, found: bool) {
        self.proofs_generated.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.not_found.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_insertion_failure(&self) {
        self.insertion_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> ProofStatsSnapshot {
        ProofStatsSnapshot {
            proofs_generated: self.proofs_generated.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            insertion_failures: self.insertion_failures.load(Ordering::Relaxed),
            transactions_inserted: self.transactions_inserted.load(Ordering::Relaxed),
        }
    }
}

/// Serializable copy of [`ProofStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStatsSnapshot {
    pub proofs_generated: u64,
    pub not_found: u64,
    pub insertion_failures: u64,
    pub transactions_inserted: u64,
}
