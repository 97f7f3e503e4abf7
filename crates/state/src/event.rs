//! Events that settlement operations emit for external observers.
//!
//! Operations push these into a pending buffer instead of notifying anything
//! directly; the host drains the buffer after each operation and dispatches
//! however it likes.  Emitting one should not be able to fail.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::id::{AccountId, BatchId, BlockId};

/// Identifying details of a batch, attached to batch lifecycle events and
/// returned from the operations that produce them.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Arbitrary,
    BorshDeserialize,
    BorshSerialize,
    Deserialize,
    Serialize,
)]
pub struct BatchEventInfo {
    /// Identity of the batch.
    batch_id: BatchId,

    /// Boundary block of the batch.
    boundary_id: BlockId,

    /// Boundary block of the parent batch.
    parent_boundary_id: BlockId,

    /// Index of the batch in the sequence.
    idx: u64,
}

impl BatchEventInfo {
    pub fn new(
        batch_id: BatchId,
        boundary_id: BlockId,
        parent_boundary_id: BlockId,
        idx: u64,
    ) -> Self {
        Self {
            batch_id,
            boundary_id,
            parent_boundary_id,
            idx,
        }
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
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
}

/// Something a settlement operation did that the outside world gets told
/// about.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Deserialize, Serialize,
)]
pub enum SettlementEvent {
    /// A batch of blocks was committed.
    BatchCommitted(BatchEventInfo),

    /// A batch's validity proof was accepted and the batch finalized.
    BatchFinalized(BatchEventInfo),

    /// An unfinalized batch was reverted and its blocks deleted.
    BatchReverted(BatchId),

    /// The operator role moved from the first identity to the second.
    OperatorChanged(AccountId, AccountId),

    /// The messenger role moved from the first identity to the second.
    MessengerChanged(AccountId, AccountId),
}
