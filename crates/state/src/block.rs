use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use trestle_primitives::buf::Buf32;

use crate::{id::BlockId, tx::TxRecord};

/// Block header that links the block into the L2 chain.
///
/// The ID is attested by the proposer rather than computed here, so nothing
/// may trust it before it has gone through the integrity check.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct BlockHeader {
    /// Identity the proposer attests for the block.
    block_id: BlockId,

    /// ID of the previous block, to form the blockchain.
    parent_id: BlockId,

    /// Height of the block.  The genesis block is at height 0.
    height: u64,
}

impl BlockHeader {
    pub fn new(block_id: BlockId, parent_id: BlockId, height: u64) -> Self {
        Self {
            block_id,
            parent_id,
            height,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn parent(&self) -> &BlockId {
        &self.parent_id
    }

    pub fn height(&self) -> u64 {
        self.height
    }
}

/// Full contents of a block as submitted for commitment.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct Block {
    /// Header that links the block into the L2 block chain.
    header: BlockHeader,

    /// Ordered transactions the block carries.
    txs: Vec<TxRecord>,
}

impl Block {
    pub fn new(header: BlockHeader, txs: Vec<TxRecord>) -> Self {
        Self { header, txs }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn txs(&self) -> &[TxRecord] {
        &self.txs
    }
}

/// What the ledger remembers about a committed block.  The block ID is the
/// key it's stored under, and the full transactions are not retained, only
/// their root.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct BlockRecord {
    /// ID of the parent block.
    parent_id: BlockId,

    /// Root over the ordered transactions of the block.
    txns_root: Buf32,

    /// Height of the block.
    height: u64,

    /// Index of the batch the block was committed in.
    batch_idx: u64,
}

impl BlockRecord {
    pub fn new(parent_id: BlockId, txns_root: Buf32, height: u64, batch_idx: u64) -> Self {
        Self {
            parent_id,
            txns_root,
            height,
            batch_idx,
        }
    }

    pub fn parent_id(&self) -> &BlockId {
        &self.parent_id
    }

    pub fn txns_root(&self) -> &Buf32 {
        &self.txns_root
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn batch_idx(&self) -> u64 {
        self.batch_idx
    }
}
