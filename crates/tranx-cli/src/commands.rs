//! Command implementations.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tranx_proof::{TransactionProof, TransactionProofApi};
use tranx_types::Block;

/// Outcome of checking a proof against the block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// Proof shows the transaction under the header root.
    Included,
    /// Proof shows the index absent under the header root.
    Excluded,
    /// Proof does not match the header root.
    Failed { reason: String },
}

impl Verification {
    /// Whether the verification outcome agrees with the proof's found flag.
    pub fn agrees_with(&self, found: bool) -> bool {
        match self {
            Self::Included => found,
            Self::Excluded => !found,
            Self::Failed { .. } => false,
        }
    }
}

/// JSON document printed by `tranx prove`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProveReport {
    pub block_number: u64,
    #[serde_as(as = "Hex")]
    pub transactions_root: [u8; 32],
    pub index: u64,
    pub transaction_count: usize,
    #[serde(flatten)]
    pub result: TransactionProof,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verification: Option<Verification>,
}

impl ProveReport {
    /// Whether the command should exit successfully.
    pub fn is_success(&self) -> bool {
        if self.result.is_aborted() {
            return false;
        }
        self.verification
            .as_ref()
            .map_or(true, |v| v.agrees_with(self.result.found))
    }
}

/// Read a block from a JSON file.
pub fn load_block(path: &Path) -> anyhow::Result<Block> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read block file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse block JSON in {}", path.display()))
}

/// Build the proof for `index` and optionally verify it.
pub fn prove<A>(api: &A, block: &Block, index: u64, verify: bool) -> ProveReport
where
    A: TransactionProofApi + ?Sized,
{
    let result = api.get_transaction_proof(block, index);
    info!(
        block = block.header.number,
        index,
        found = result.found,
        aborted = result.is_aborted(),
        "Proof generated"
    );

    let verification = verify.then(|| {
        let root = &block.header.transactions_root;
        match api.verify_transaction_proof(root, &result) {
            Ok(Some(_)) => Verification::Included,
            Ok(None) => Verification::Excluded,
            Err(err) => {
                warn!(error = %err, "Proof does not match transactions root");
                Verification::Failed {
                    reason: err.to_string(),
                }
            }
        }
    });

    ProveReport {
        block_number: block.header.number,
        transactions_root: block.header.transactions_root,
        index,
        transaction_count: block.transaction_count(),
        result,
        verification,
    }
}
