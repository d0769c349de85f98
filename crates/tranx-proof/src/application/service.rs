//! # Transaction Proof Service
//!
//! Application service building inclusion proofs: fresh trie per request,
//! every transaction inserted under its index key in derived order, then a
//! single proof extraction for the target.

use lazy_static::lazy_static;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use tranx_trie::Hash;

use crate::adapters::{
    encode_for_derive, EncodeBufferPool, PatriciaTrieFactory, GLOBAL_BUFFER_POOL,
};
use crate::domain::{
    append_index_key, index_key, insertion_order, BuildState, ProofConfig, ProofError,
    ProofStats, ProofStatsSnapshot, TransactionProof,
};
use crate::ports::{TransactionList, TransactionProofApi, TrieFactory, TrieService};

lazy_static! {
    static ref DEFAULT_SERVICE: TransactionProofService =
        TransactionProofService::with_global_pool(ProofConfig::default());
}

/// Build the inclusion proof for transaction `index` with the process-wide
/// default service.
pub fn get_transaction_proof<L>(transactions: &L, index: u64) -> TransactionProof
where
    L: TransactionList + ?Sized,
{
    DEFAULT_SERVICE.get_transaction_proof(transactions, index)
}

/// Transaction Proof Service - orchestrates key derivation, encoding and
/// trie population.
pub struct TransactionProofService<F: TrieFactory = PatriciaTrieFactory> {
    /// Source of fresh tries.
    factory: F,
    /// Scratch buffers for transaction encoding.
    pool: Arc<EncodeBufferPool>,
    /// Configuration.
    config: ProofConfig,
    /// Counters.
    stats: ProofStats,
}

impl TransactionProofService<PatriciaTrieFactory> {
    /// Create a service with its own buffer pool.
    pub fn new(config: ProofConfig) -> Self {
        let pool = Arc::new(EncodeBufferPool::from_config(&config));
        Self::with_factory(PatriciaTrieFactory::from_config(&config), pool, config)
    }

    /// Create a service sharing the process-wide buffer pool.
    pub fn with_global_pool(config: ProofConfig) -> Self {
        let pool = Arc::clone(&GLOBAL_BUFFER_POOL);
        Self::with_factory(PatriciaTrieFactory::from_config(&config), pool, config)
    }
}

impl Default for TransactionProofService<PatriciaTrieFactory> {
    fn default() -> Self {
        Self::new(ProofConfig::default())
    }
}

impl<F: TrieFactory> TransactionProofService<F> {
    /// Create a service over any trie factory.
    pub fn with_factory(factory: F, pool: Arc<EncodeBufferPool>, config: ProofConfig) -> Self {
        Self {
            factory,
            pool,
            config,
            stats: ProofStats::new(),
        }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<EncodeBufferPool> {
        &self.pool
    }

    pub fn stats(&self) -> ProofStatsSnapshot {
        self.stats.snapshot()
    }

    /// Build the inclusion proof for transaction `index`.
    ///
    /// An insertion failure yields the aborted result (no proof, no key,
    /// `found = false`).
    pub fn get_transaction_proof<L>(&self, transactions: &L, index: u64) -> TransactionProof
    where
        L: TransactionList + ?Sized,
    {
        self.try_get_transaction_proof(transactions, index)
            .unwrap_or_else(|_| TransactionProof::aborted())
    }

    /// Build the inclusion proof for transaction `index`, surfacing an
    /// insertion failure as `ProofError::Insertion`.
    ///
    /// ## Algorithm
    ///
    /// 1. Create an empty trie
    /// 2. For each index in insertion order: derive the key, encode the
    ///    transaction into the scratch buffer, copy it out, put
    /// 3. Stop at the first rejected put, no retry
    /// 4. Prove the target key
    ///
    /// `index >= len` is not an error: the key is simply absent.
    pub fn try_get_transaction_proof<L>(
        &self,
        transactions: &L,
        index: u64,
    ) -> Result<TransactionProof, ProofError>
    where
        L: TransactionList + ?Sized,
    {
        let count = transactions.len() as u64;
        let mut state = BuildState::Created;
        let mut trie = self.factory.create();

        advance(&mut state, BuildState::Populating, index);
        {
            let mut scratch = self.pool.acquire();
            let mut key = Vec::with_capacity(9);
            let mut inserted = 0u64;

            for i in insertion_order(count) {
                key.clear();
                append_index_key(&mut key, i);
                let value = encode_for_derive(transactions, i as usize, &mut scratch);

                if let Err(err) = trie.put(&key, value) {
                    advance(&mut state, BuildState::PopulatingFailed, index);
                    warn!(
                        target_index = index,
                        failed_index = i,
                        inserted,
                        error = %err,
                        "Trie rejected transaction, aborting proof"
                    );
                    self.stats.record_inserted(inserted);
                    self.stats.record_insertion_failure();
                    return Err(ProofError::insertion(i, &key, err));
                }
                inserted += 1;
            }
            self.stats.record_inserted(inserted);
        }
        advance(&mut state, BuildState::Populated, index);

        let key = index_key(index);
        let (proof, found) = trie.prove(&key);
        advance(&mut state, BuildState::ProofExtracted, index);

        self.stats.record_completed(found);
        debug!(
            target_index = index,
            transactions = count,
            found,
            proof_nodes = proof.len(),
            proof_bytes = proof.size_bytes(),
            "Transaction proof built"
        );

        Ok(TransactionProof::new(proof, key, found))
    }

    /// Build proofs for several indices over the same list.
    ///
    /// Each index gets its own trie. Batches of at least
    /// `parallel_threshold` run on the rayon pool.
    pub fn get_transaction_proofs<L>(
        &self,
        transactions: &L,
        indices: &[u64],
    ) -> Vec<TransactionProof>
    where
        L: TransactionList + Sync + ?Sized,
    {
        if indices.len() >= self.config.parallel_threshold {
            debug!(batch = indices.len(), "Building transaction proofs in parallel");
            indices
                .par_iter()
                .map(|&index| self.get_transaction_proof(transactions, index))
                .collect()
        } else {
            indices
                .iter()
                .map(|&index| self.get_transaction_proof(transactions, index))
                .collect()
        }
    }
}

fn advance(state: &mut BuildState, next: BuildState, index: u64) {
    debug_assert!(state.can_transition_to(next), "{} -> {}", state, next);
    trace!(
        target_index = index,
        from = %state,
        to = %next,
        terminal = next.is_terminal(),
        "Proof build state"
    );
    *state = next;
}

impl<F: TrieFactory> TransactionProofApi for TransactionProofService<F> {
    fn get_transaction_proof(
        &self,
        transactions: &(dyn TransactionList + Sync),
        index: u64,
    ) -> TransactionProof {
        TransactionProofService::get_transaction_proof(self, transactions, index)
    }

    fn try_get_transaction_proof(
        &self,
        transactions: &(dyn TransactionList + Sync),
        index: u64,
    ) -> Result<TransactionProof, ProofError> {
        TransactionProofService::try_get_transaction_proof(self, transactions, index)
    }

    fn get_transaction_proofs(
        &self,
        transactions: &(dyn TransactionList + Sync),
        indices: &[u64],
    ) -> Vec<TransactionProof> {
        TransactionProofService::get_transaction_proofs(self, transactions, indices)
    }

    fn verify_transaction_proof(
        &self,
        root: &Hash,
        proof: &TransactionProof,
    ) -> Result<Option<Vec<u8>>, ProofError> {
        proof.verify(root)
    }

    fn get_stats(&self) -> ProofStatsSnapshot {
        self.stats.snapshot()
    }
}
