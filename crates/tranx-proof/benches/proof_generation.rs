//! # Proof Generation Benchmarks
//!
//! ```bash
//! cargo bench --package tranx-proof --bench proof_generation
//! ```
//!
//! | Group | Measures |
//! |-------|----------|
//! | single | One proof over blocks of 16 to 1024 transactions |
//! | batch | Sequential vs rayon batches over one block |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tranx_proof::{ProofConfig, TransactionProofService};
use tranx_types::{Transaction, U256};

fn make_transactions(count: u64) -> Vec<Transaction> {
    (0..count)
        .map(|nonce| Transaction {
            nonce,
            gas_price: U256::from(30_000_000_000u64),
            gas_limit: 21_000,
            to: Some([0x5A; 20]),
            value: U256::from(nonce),
            input: vec![0xAB; 68],
            v: U256::from(38u64),
            r: U256::from(nonce + 1),
            s: U256::from(nonce + 2),
        })
        .collect()
}

fn bench_single_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("tranx-proof/single");
    let service = TransactionProofService::new(ProofConfig::default());

    for count in [16u64, 128, 129, 1024] {
        let transactions = make_transactions(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| service.get_transaction_proof(&transactions, black_box(count / 2)))
        });
    }
    group.finish();
}

fn bench_batch_proofs(c: &mut Criterion) {
    let mut group = c.benchmark_group("tranx-proof/batch");
    let transactions = make_transactions(512);
    let indices: Vec<u64> = (0..512).step_by(16).collect();

    let sequential = TransactionProofService::new(ProofConfig {
        parallel_threshold: usize::MAX,
        ..ProofConfig::default()
    });
    let parallel = TransactionProofService::new(ProofConfig {
        parallel_threshold: 1,
        ..ProofConfig::default()
    });

    group.bench_function("sequential", |b| {
        b.iter(|| sequential.get_transaction_proofs(&transactions, black_box(&indices)))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| parallel.get_transaction_proofs(&transactions, black_box(&indices)))
    });
    group.finish();
}

criterion_group!(
    name = proof_benches;
    config = Criterion::default().sample_size(30);
    targets = bench_single_proof, bench_batch_proofs
);
criterion_main!(proof_benches);
