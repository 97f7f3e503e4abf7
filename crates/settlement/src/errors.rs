use thiserror::Error;

use trestle_state::id::{AccountId, BatchId, BlockId};
use trestle_verifier::VerifyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("caller {0:?} lacks the role for this operation")]
    Unauthorized(AccountId),

    #[error("chain already bootstrapped")]
    AlreadyBootstrapped,

    #[error("genesis block malformed")]
    InvalidGenesisShape,

    #[error("proposal contains no blocks")]
    EmptyBatch,

    #[error("batch {0:?} already committed")]
    DuplicateBatch(BatchId),

    #[error("block {0:?} already committed")]
    DuplicateBlock(BlockId),

    #[error("parent boundary block {0:?} not committed")]
    ParentNotCommitted(BlockId),

    #[error("batch index out of sequence (exp {0}, got {1})")]
    BatchIndexMismatch(u64, u64),

    #[error("block height out of sequence (exp {0}, got {1})")]
    HeightMismatch(u64, u64),

    #[error("parent link mismatch (exp {0:?}, got {1:?})")]
    ParentLinkMismatch(BlockId, BlockId),

    #[error("block header {0:?} failed integrity check")]
    InvalidHeader(BlockId),

    #[error("no batch {0:?}")]
    NoSuchBatch(BatchId),

    #[error("batch {0:?} already finalized")]
    AlreadyFinalized(BatchId),

    #[error("cannot revert finalized batch {0:?}")]
    CannotRevertFinalized(BatchId),

    #[error("proof rejected: {0}")]
    ProofRejected(#[from] VerifyError),

    #[error("no message at position {0}")]
    OutOfRange(u64),

    #[error("role already held by that identity")]
    RoleUnchanged,
}
