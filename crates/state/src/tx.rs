//! Transaction records as the settlement layer sees them.
//!
//! Execution never happens here, so a transaction is just an opaque payload
//! that contributes to the transaction root of the block carrying it.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use trestle_primitives::{buf::Buf32, hash};

/// A single L2 transaction payload.  The encoding is decided by the L2
/// execution layer and not interpreted here.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Default,
    Arbitrary,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct TxRecord(Vec<u8>);

impl TxRecord {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for TxRecord {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// Computes the transaction root of an ordered sequence of transactions.
pub fn compute_txns_root(txs: &[TxRecord]) -> Buf32 {
    hash::compute_borsh_hash(&txs)
}
