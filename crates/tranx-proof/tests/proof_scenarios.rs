//! # Proof Scenario Tests for tranx-proof
//!
//! End-to-end checks of proof building through the public API.
//!
//! ## Test Categories
//!
//! 1. **Boundaries** - Empty lists, single transactions, 128 and 129 entries
//! 2. **Round Trips** - Every stored index proves and verifies
//! 3. **Failure Paths** - Rejected puts abort and release the scratch buffer
//! 4. **Concurrency** - Parallel requests sharing one pool

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use tranx_proof::{
    encode_transaction, get_transaction_proof, index_key, EncodeBufferPool, ProofConfig,
    ProofError, TransactionProof, TransactionProofService, TrieService,
};
use tranx_trie::{PatriciaMerkleTrie, Proof, EMPTY_TRIE_ROOT};
use tranx_types::{Block, BlockHeader, Transaction, U256};

// =============================================================================
// TEST HELPERS
// =============================================================================

fn make_tx(nonce: u64) -> Transaction {
    Transaction {
        nonce,
        gas_price: U256::from(1_000_000_000u64),
        gas_limit: 21_000,
        to: Some([0xBB; 20]),
        value: U256::from(nonce * 7),
        input: vec![],
        v: U256::from(27u64),
        r: U256::from(nonce + 1),
        s: U256::from(nonce + 2),
    }
}

fn make_block(count: u64) -> Block {
    let transactions: Vec<Transaction> = (0..count).map(make_tx).collect();
    let header = BlockHeader {
        number: 1,
        transactions_root: transactions_root(&transactions),
        ..Default::default()
    };
    Block::new(header, transactions)
}

fn encoded(tx: &Transaction) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_transaction(tx, &mut buf);
    buf
}

/// Root of the transaction trie, built independently in plain index order.
fn transactions_root(transactions: &[Transaction]) -> [u8; 32] {
    let mut trie = PatriciaMerkleTrie::new();
    for (i, tx) in transactions.iter().enumerate() {
        trie.put(&index_key(i as u64), encoded(tx)).unwrap();
    }
    trie.root_hash()
}

fn service() -> TransactionProofService {
    TransactionProofService::new(ProofConfig::for_testing())
}

/// Trie that rejects the n-th put and counts attempts.
struct FailingTrie {
    attempts: Arc<Mutex<usize>>,
    fail_on: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("storage full")]
struct StorageFull;

impl TrieService for FailingTrie {
    type Error = StorageFull;

    fn put(&mut self, _key: &[u8], _value: Vec<u8>) -> Result<(), StorageFull> {
        let mut attempts = self.attempts.lock();
        *attempts += 1;
        if *attempts == self.fail_on {
            return Err(StorageFull);
        }
        Ok(())
    }

    fn prove(&self, _key: &[u8]) -> (Proof, bool) {
        (Proof::default(), false)
    }
}

// =============================================================================
// BOUNDARIES
// =============================================================================

#[test]
fn brutal_empty_block_yields_empty_proof() {
    let block = make_block(0);
    let result = service().get_transaction_proof(&block, 0);

    assert!(!result.found);
    assert_eq!(result.key, Some(vec![0x80]));
    assert!(result.proof.as_ref().unwrap().is_empty());
    assert_eq!(result.verify(&EMPTY_TRIE_ROOT), Ok(None));
}

#[test]
fn brutal_single_transaction() {
    let block = make_block(1);
    let result = service().get_transaction_proof(&block, 0);

    assert!(result.found);
    assert_eq!(result.proof.as_ref().unwrap().len(), 1);
    assert_eq!(
        result.verify(&block.header.transactions_root),
        Ok(Some(encoded(&block.transactions[0])))
    );
}

#[test]
fn brutal_three_transactions_target_zero() {
    let block = make_block(3);
    let result = service().get_transaction_proof(&block, 0);

    assert!(result.found);
    assert_eq!(result.key, Some(vec![0x80]));
    assert!(!result.proof.as_ref().unwrap().is_empty());
    assert!(result
        .verify(&block.header.transactions_root)
        .unwrap()
        .is_some());
}

#[test]
fn brutal_boundary_sizes_round_trip() {
    for count in [1u64, 2, 127, 128, 129] {
        let block = make_block(count);
        let service = service();
        for index in 0..count {
            let result = service.get_transaction_proof(&block, index);
            assert!(result.found, "count {count} index {index}");
            let value = result.verify(&block.header.transactions_root).unwrap();
            assert_eq!(value, Some(encoded(&block.transactions[index as usize])));
        }
    }
}

#[test]
fn brutal_out_of_range_is_not_found() {
    let block = make_block(129);
    let service = service();

    for index in [129u64, 130, 1_000, u64::MAX] {
        let result = service.get_transaction_proof(&block, index);
        assert!(!result.found);
        assert!(!result.is_aborted());
        assert_eq!(result.key, Some(index_key(index)));
        // Still a valid exclusion proof
        assert_eq!(result.verify(&block.header.transactions_root), Ok(None));
    }
}

#[test]
fn brutal_requests_are_idempotent() {
    let block = make_block(200);
    let service = service();

    let first = service.get_transaction_proof(&block, 150);
    let second = service.get_transaction_proof(&block, 150);
    let third = get_transaction_proof(&block, 150);

    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn brutal_slice_vec_and_block_agree() {
    let block = make_block(10);
    let service = service();

    let from_block = service.get_transaction_proof(&block, 4);
    let from_vec = service.get_transaction_proof(&block.transactions, 4);
    let from_slice = service.get_transaction_proof(block.transactions(), 4);

    assert_eq!(from_block, from_vec);
    assert_eq!(from_block, from_slice);
}

// =============================================================================
// FAILURE PATHS
// =============================================================================

#[test]
fn brutal_second_put_failure_aborts_and_releases_buffer() {
    let attempts = Arc::new(Mutex::new(0));
    let factory_attempts = Arc::clone(&attempts);
    let pool = Arc::new(EncodeBufferPool::new(4, 64));
    let service = TransactionProofService::with_factory(
        move || FailingTrie {
            attempts: Arc::clone(&factory_attempts),
            fail_on: 2,
        },
        Arc::clone(&pool),
        ProofConfig::for_testing(),
    );
    let block = make_block(10);

    let result = service.get_transaction_proof(&block, 3);

    assert_eq!(result, TransactionProof::aborted());
    assert_eq!(*attempts.lock(), 2);
    assert_eq!(pool.outstanding(), 0);
    assert_eq!(pool.idle(), 1);
    assert_eq!(service.stats().insertion_failures, 1);
}

#[test]
fn brutal_failure_surfaces_through_try_variant() {
    let attempts = Arc::new(Mutex::new(0));
    let factory_attempts = Arc::clone(&attempts);
    let service = TransactionProofService::with_factory(
        move || FailingTrie {
            attempts: Arc::clone(&factory_attempts),
            fail_on: 1,
        },
        Arc::new(EncodeBufferPool::new(1, 64)),
        ProofConfig::for_testing(),
    );
    let block = make_block(3);

    match service.try_get_transaction_proof(&block, 0) {
        Err(ProofError::Insertion { index, key, reason }) => {
            assert_eq!(index, 1);
            assert_eq!(key, "01");
            assert_eq!(reason, "storage full");
        }
        other => panic!("expected insertion error, got {other:?}"),
    }
}

#[test]
fn brutal_aborted_proof_does_not_verify() {
    let result = TransactionProof::aborted();
    assert_eq!(result.verify(&EMPTY_TRIE_ROOT), Err(ProofError::Aborted));
}

#[test]
fn brutal_tampered_proof_rejected() {
    let block = make_block(50);
    let mut result = service().get_transaction_proof(&block, 20);

    let mut nodes = result.proof.take().unwrap().into_nodes();
    let last = nodes.len() - 1;
    nodes[last][3] ^= 0x01;
    result.proof = Some(Proof::new(nodes));

    assert!(matches!(
        result.verify(&block.header.transactions_root),
        Err(ProofError::Verification(_))
    ));
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn brutal_concurrent_requests_share_pool() {
    let service = Arc::new(service());
    let block = Arc::new(make_block(300));

    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let service = Arc::clone(&service);
            let block = Arc::clone(&block);
            thread::spawn(move || {
                for round in 0..10u64 {
                    let index = (worker * 37 + round * 11) % 300;
                    let result = service.get_transaction_proof(block.as_ref(), index);
                    assert!(result.found);
                    let value = result.verify(&block.header.transactions_root).unwrap();
                    assert_eq!(value, Some(encoded(&block.transactions[index as usize])));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.pool().outstanding(), 0);
    assert_eq!(service.stats().proofs_generated, 80);
}

#[test]
fn brutal_parallel_batch_matches_sequential() {
    let block = make_block(140);
    let indices: Vec<u64> = (0..140).step_by(7).chain([140, 500]).collect();

    let parallel = TransactionProofService::new(ProofConfig {
        parallel_threshold: 1,
        ..ProofConfig::default()
    });
    let sequential = service();

    assert_eq!(
        parallel.get_transaction_proofs(&block, &indices),
        sequential.get_transaction_proofs(&block, &indices)
    );
}
