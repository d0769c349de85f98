//! # Transaction RLP Encoder
//!
//! Canonical encoding of legacy transactions and the `TransactionList`
//! implementations for block containers.
//!
//! ```text
//! rlp([nonce, gas_price, gas_limit, to, value, input, v, r, s])
//! ```
//!
//! `to` is the empty string for contract creation.

use tranx_trie::rlp;
use tranx_types::{Block, Transaction, U256};

use crate::ports::TransactionList;

/// Append the RLP encoding of `tx` to `buf`.
pub fn encode_transaction(tx: &Transaction, buf: &mut Vec<u8>) {
    let start = buf.len();

    rlp::append_uint64(buf, tx.nonce);
    append_u256(buf, &tx.gas_price);
    rlp::append_uint64(buf, tx.gas_limit);
    match &tx.to {
        Some(to) => rlp::append_bytes(buf, to),
        None => rlp::append_bytes(buf, &[]),
    }
    append_u256(buf, &tx.value);
    rlp::append_bytes(buf, &tx.input);
    append_u256(buf, &tx.v);
    append_u256(buf, &tx.r);
    append_u256(buf, &tx.s);

    let payload_len = buf.len() - start;
    let mut header = Vec::with_capacity(9);
    rlp::append_list_header(&mut header, payload_len);
    buf.splice(start..start, header);
}

/// Encode transaction `index` of `transactions` through `scratch` and return
/// an owned copy of the bytes.
///
/// `scratch` is cleared first; the returned value never aliases it.
pub fn encode_for_derive<L>(transactions: &L, index: usize, scratch: &mut Vec<u8>) -> Vec<u8>
where
    L: TransactionList + ?Sized,
{
    scratch.clear();
    transactions.encode_index(index, scratch);
    scratch.as_slice().to_vec()
}

fn append_u256(buf: &mut Vec<u8>, value: &U256) {
    let mut be = [0u8; 32];
    value.to_big_endian(&mut be);
    rlp::append_uint_be(buf, &be);
}

impl TransactionList for [Transaction] {
    fn len(&self) -> usize {
        <[Transaction]>::len(self)
    }

    fn encode_index(&self, index: usize, buf: &mut Vec<u8>) {
        encode_transaction(&self[index], buf);
    }
}

impl TransactionList for Vec<Transaction> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn encode_index(&self, index: usize, buf: &mut Vec<u8>) {
        encode_transaction(&self[index], buf);
    }
}

impl TransactionList for Block {
    fn len(&self) -> usize {
        self.transaction_count()
    }

    fn encode_index(&self, index: usize, buf: &mut Vec<u8>) {
        encode_transaction(&self.transactions()[index], buf);
    }
}
