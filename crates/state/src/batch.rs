//! Batch types and identity derivation.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use trestle_primitives::hash;

use crate::{
    block::Block,
    id::{BatchId, BlockId},
};

/// The content that defines a batch's identity.  Committing the same blocks
/// under the same index hashes to the same ID, which is how re-submissions
/// get detected.
#[derive(BorshSerialize)]
struct BatchIdPreimage<'a> {
    boundary_id: &'a BlockId,
    parent_boundary_id: &'a BlockId,
    idx: u64,
}

/// Computes the identity of a batch from its boundary block, the boundary
/// block of its parent batch, and its index.
pub fn compute_batch_id(boundary_id: &BlockId, parent_boundary_id: &BlockId, idx: u64) -> BatchId {
    let preimage = BatchIdPreimage {
        boundary_id,
        parent_boundary_id,
        idx,
    };
    BatchId::from(hash::compute_borsh_hash(&preimage))
}

/// A proposed batch as submitted by the operator: an ordered run of blocks
/// claiming a slot in the batch sequence.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct BatchProposal {
    /// Boundary block of the batch this one claims to extend.
    parent_boundary_id: BlockId,

    /// Index the batch claims in the sequence.
    idx: u64,

    /// The blocks, in chain order.  The last one becomes the boundary block.
    blocks: Vec<Block>,
}

impl BatchProposal {
    pub fn new(parent_boundary_id: BlockId, idx: u64, blocks: Vec<Block>) -> Self {
        Self {
            parent_boundary_id,
            idx,
            blocks,
        }
    }

    pub fn parent_boundary_id(&self) -> &BlockId {
        &self.parent_boundary_id
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// What the ledger remembers about a committed batch.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct BatchRecord {
    /// Last block of the batch.
    boundary_id: BlockId,

    /// Last block of the parent batch.
    parent_boundary_id: BlockId,

    /// Index of the batch in the sequence.
    idx: u64,

    /// Whether a validity proof has been accepted for the batch.
    finalized: bool,
}

impl BatchRecord {
    /// Creates a record for a freshly committed, unfinalized batch.
    pub fn new(boundary_id: BlockId, parent_boundary_id: BlockId, idx: u64) -> Self {
        Self {
            boundary_id,
            parent_boundary_id,
            idx,
            finalized: false,
        }
    }

    pub fn boundary_id(&self) -> &BlockId {
        &self.boundary_id
    }

    pub fn parent_boundary_id(&self) -> &BlockId {
        &self.parent_boundary_id
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Marks the batch as finalized.  There is no way back.
    pub fn set_finalized(&mut self) {
        self.finalized = true;
    }
}

/// Commits to a particular batch by its index and identity, used to track
/// the finalization frontier.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct BatchCommitment {
    /// Index of the batch.
    idx: u64,

    /// Identity of the batch.
    batch_id: BatchId,
}

impl BatchCommitment {
    pub fn new(idx: u64, batch_id: BatchId) -> Self {
        Self { idx, batch_id }
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }
}
