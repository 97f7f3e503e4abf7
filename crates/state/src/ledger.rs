//! The bookkeeping state the settlement layer keeps for the chain.
//!
//! Everything in here is owned, key-addressed storage.  Only the settlement
//! operations mutate it, and each operation either applies all of its writes
//! or none of them; the host supplies whole-operation atomicity on top.

use std::collections::HashMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    batch::{BatchCommitment, BatchRecord},
    block::BlockRecord,
    id::{BatchId, BlockId},
    outbox::MessageOutbox,
    roles::RoleTable,
};

/// Records of every currently-committed block, by identity.
#[derive(Clone, Debug, Eq, PartialEq, Default, BorshDeserialize, BorshSerialize)]
pub struct BlockLedger {
    blocks: HashMap<BlockId, BlockRecord>,
}

impl BlockLedger {
    pub fn new_empty() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&BlockRecord> {
        self.blocks.get(id)
    }

    /// Stores a record under an identity.  Callers check for duplicates
    /// before getting here; a record is never overwritten.
    pub fn insert(&mut self, id: BlockId, record: BlockRecord) {
        debug_assert!(!self.blocks.contains_key(&id), "ledger: block overwrite");
        self.blocks.insert(id, record);
    }

    pub fn remove(&mut self, id: &BlockId) -> Option<BlockRecord> {
        self.blocks.remove(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Records of every currently-committed batch, by identity.
#[derive(Clone, Debug, Eq, PartialEq, Default, BorshDeserialize, BorshSerialize)]
pub struct BatchLedger {
    batches: HashMap<BatchId, BatchRecord>,
}

impl BatchLedger {
    pub fn new_empty() -> Self {
        Self {
            batches: HashMap::new(),
        }
    }

    pub fn contains(&self, id: &BatchId) -> bool {
        self.batches.contains_key(id)
    }

    pub fn get(&self, id: &BatchId) -> Option<&BatchRecord> {
        self.batches.get(id)
    }

    pub fn get_mut(&mut self, id: &BatchId) -> Option<&mut BatchRecord> {
        self.batches.get_mut(id)
    }

    /// Stores a record under an identity.  Callers check for duplicates
    /// before getting here; a record is never overwritten.
    pub fn insert(&mut self, id: BatchId, record: BatchRecord) {
        debug_assert!(!self.batches.contains_key(&id), "ledger: batch overwrite");
        self.batches.insert(id, record);
    }

    pub fn remove(&mut self, id: &BatchId) -> Option<BatchRecord> {
        self.batches.remove(id)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Which batches have been finalized, and how far finalization has reached.
///
/// The frontier is the highest-index finalized batch.  Since proofs may land
/// out of order, recording a finalization below the frontier leaves the
/// frontier where it is.
#[derive(Clone, Debug, Eq, PartialEq, Default, BorshDeserialize, BorshSerialize)]
pub struct FinalizedView {
    /// Highest-index finalized batch so far.  Unset until genesis import.
    frontier: Option<BatchCommitment>,

    /// Finalized batch identity by batch index.
    by_index: HashMap<u64, BatchId>,
}

impl FinalizedView {
    pub fn new_empty() -> Self {
        Self {
            frontier: None,
            by_index: HashMap::new(),
        }
    }

    pub fn frontier(&self) -> Option<&BatchCommitment> {
        self.frontier.as_ref()
    }

    pub fn batch_at(&self, idx: u64) -> Option<&BatchId> {
        self.by_index.get(&idx)
    }

    /// Records a batch as finalized.  The frontier moves only if the index
    /// is strictly past it, so it never regresses.
    pub fn record_finalized(&mut self, idx: u64, batch_id: BatchId) {
        self.by_index.insert(idx, batch_id);

        let advances = match &self.frontier {
            Some(cur) => idx > cur.idx(),
            None => true,
        };
        if advances {
            self.frontier = Some(BatchCommitment::new(idx, batch_id));
        }
    }
}

/// Full settlement-layer state for the chain: the outbox, the block and
/// batch ledgers, finalization bookkeeping, and the role table.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct SettlementState {
    outbox: MessageOutbox,
    blocks: BlockLedger,
    batches: BatchLedger,
    finalized: FinalizedView,
    roles: RoleTable,
}

impl SettlementState {
    /// Fresh state with empty ledgers, before genesis import.
    pub fn new(roles: RoleTable) -> Self {
        Self {
            outbox: MessageOutbox::new_empty(),
            blocks: BlockLedger::new_empty(),
            batches: BatchLedger::new_empty(),
            finalized: FinalizedView::new_empty(),
            roles,
        }
    }

    pub fn outbox(&self) -> &MessageOutbox {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut MessageOutbox {
        &mut self.outbox
    }

    pub fn blocks(&self) -> &BlockLedger {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut BlockLedger {
        &mut self.blocks
    }

    pub fn batches(&self) -> &BatchLedger {
        &self.batches
    }

    pub fn batches_mut(&mut self) -> &mut BatchLedger {
        &mut self.batches
    }

    pub fn finalized(&self) -> &FinalizedView {
        &self.finalized
    }

    pub fn finalized_mut(&mut self) -> &mut FinalizedView {
        &mut self.finalized
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut RoleTable {
        &mut self.roles
    }

    /// Whether genesis import has happened.
    pub fn is_bootstrapped(&self) -> bool {
        self.finalized.frontier().is_some()
    }
}
