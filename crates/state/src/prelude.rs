pub use crate::{
    batch::{BatchCommitment, BatchProposal, BatchRecord},
    block::{Block, BlockHeader, BlockRecord},
    event::SettlementEvent,
    id::{AccountId, BatchId, BlockId},
    ledger::SettlementState,
    outbox::{MessageOutbox, OutboxMessage},
    roles::RoleTable,
};
