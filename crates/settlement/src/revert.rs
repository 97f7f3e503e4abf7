//! Reverting uncommitted-to-proof batches.

use tracing::*;

use trestle_state::{id::BatchId, ledger::SettlementState};

use crate::errors::Error;

/// Reverts an unfinalized batch: walks the stored parent links back from
/// its boundary block, deleting each block record, then drops the batch
/// record itself.  The parent batch's boundary block stays.
///
/// Cost is proportional to the number of blocks in the batch.  Assumes no
/// later batch holds a link into the deleted blocks, which holds as long as
/// batches commit under sequential indices.
pub fn revert_batch(state: &mut SettlementState, batch_id: &BatchId) -> Result<u64, Error> {
    let Some(batch) = state.batches().get(batch_id) else {
        return Err(Error::NoSuchBatch(*batch_id));
    };

    if batch.is_finalized() {
        return Err(Error::CannotRevertFinalized(*batch_id));
    }

    let parent_boundary_id = *batch.parent_boundary_id();
    let mut at = *batch.boundary_id();
    let mut deleted = 0u64;

    // Walk down to the parent boundary, exclusive.
    while at != parent_boundary_id {
        let Some(block) = state.blocks_mut().remove(&at) else {
            break;
        };
        at = *block.parent_id();
        deleted += 1;
    }

    state.batches_mut().remove(batch_id);

    warn!(?batch_id, %deleted, "reverted batch");
    Ok(deleted)
}
