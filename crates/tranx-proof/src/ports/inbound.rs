//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the transaction proof service.

use crate::domain::{ProofError, ProofStatsSnapshot, TransactionProof};
use crate::ports::TransactionList;
use tranx_trie::Hash;

/// Primary API for transaction inclusion proofs.
pub trait TransactionProofApi {
    /// Build the inclusion proof for transaction `index`.
    ///
    /// ## Returns
    ///
    /// - `found = true`: proof and key for a stored transaction
    /// - `found = false` with a proof: `index` is out of range
    /// - aborted result (no proof, no key): the trie rejected a put
    fn get_transaction_proof(
        &self,
        transactions: &(dyn TransactionList + Sync),
        index: u64,
    ) -> TransactionProof;

    /// Same as `get_transaction_proof` but surfaces insertion failures.
    fn try_get_transaction_proof(
        &self,
        transactions: &(dyn TransactionList + Sync),
        index: u64,
    ) -> Result<TransactionProof, ProofError>;

    /// Build proofs for several indices over the same transaction list.
    fn get_transaction_proofs(
        &self,
        transactions: &(dyn TransactionList + Sync),
        indices: &[u64],
    ) -> Vec<TransactionProof>;

    /// Check a proof against a transactions root.
    fn verify_transaction_proof(
        &self,
        root: &Hash,
        proof: &TransactionProof,
    ) -> Result<Option<Vec<u8>>, ProofError>;

    /// Get proof service statistics.
    fn get_stats(&self) -> ProofStatsSnapshot;
}
