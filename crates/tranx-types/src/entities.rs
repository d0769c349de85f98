//! # Domain Entities
//!
//! Block and transaction containers.
//!
//! - **Chain**: Block, `BlockHeader`, Transaction
//! - **Primitives**: Hash, Address, U256

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte hash (Keccak-256 for trie roots and node references).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// A legacy (pre-typed-envelope) transaction.
///
/// The proof builder treats this as opaque: it is only ever serialized to
/// its canonical RLP list `[nonce, gas_price, gas_limit, to, value, input,
/// v, r, s]`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transaction {
    /// Sender's nonce.
    pub nonce: u64,
    /// Gas price in base units.
    pub gas_price: U256,
    /// Gas limit for this transaction.
    pub gas_limit: u64,
    /// Recipient address (`None` for contract creation).
    #[serde_as(as = "Option<Hex>")]
    pub to: Option<Address>,
    /// Transferred value in base units.
    pub value: U256,
    /// Call data or init code.
    #[serde_as(as = "Hex")]
    #[serde(default)]
    pub input: Vec<u8>,
    /// Signature recovery value.
    pub v: U256,
    /// Signature `r` component.
    pub r: U256,
    /// Signature `s` component.
    pub s: U256,
}

/// The header of a block.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockHeader {
    /// Block number in the chain.
    pub number: u64,
    /// Hash of the parent block.
    #[serde_as(as = "Hex")]
    pub parent_hash: Hash,
    /// Root of the transaction trie committed to by this block.
    #[serde_as(as = "Hex")]
    pub transactions_root: Hash,
    /// Unix timestamp when the block was proposed.
    #[serde(default)]
    pub timestamp: u64,
}

/// A block: header plus its ordered transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Transactions in block order. Position in this list is the index that
    /// keys the transaction trie.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block from a header and its transactions.
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Borrow the transaction list.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of transactions in the block.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}
