//! Proof-gated batch finalization.

use tracing::*;

use trestle_state::{event::BatchEventInfo, id::BatchId, ledger::SettlementState};
use trestle_verifier::{Proof, ProofVerifier, PublicValues};

use crate::errors::Error;

/// Finalizes a batch if the verifier accepts the proof for it.
///
/// Finalizations may land in any order; the frontier only tracks the
/// highest finalized index and never regresses.  A rejected proof changes
/// nothing, and the batch stays open for a later, valid proof.
pub fn finalize_batch<V: ProofVerifier>(
    state: &mut SettlementState,
    batch_id: &BatchId,
    proof: &Proof,
    public_values: &PublicValues,
    verifier: &V,
) -> Result<BatchEventInfo, Error> {
    let Some(batch) = state.batches_mut().get_mut(batch_id) else {
        return Err(Error::NoSuchBatch(*batch_id));
    };

    if batch.is_finalized() {
        return Err(Error::AlreadyFinalized(*batch_id));
    }

    verifier.verify(proof, public_values)?;

    batch.set_finalized();
    let info = BatchEventInfo::new(
        *batch_id,
        *batch.boundary_id(),
        *batch.parent_boundary_id(),
        batch.idx(),
    );

    state.finalized_mut().record_finalized(info.idx(), *batch_id);

    info!(?batch_id, idx = info.idx(), "finalized batch");
    Ok(info)
}

/// Checks whether a height falls inside the span of blocks covered by a
/// *finalized* batch.  This is a range check on the batch's boundary
/// heights, not a membership proof for any particular block.
///
/// Never errors: anything that can't be resolved, including an index with
/// no finalized batch, is just `false`.
pub fn verify_height_in_finalized_batch(state: &SettlementState, idx: u64, height: u64) -> bool {
    let Some(batch_id) = state.finalized().batch_at(idx) else {
        return false;
    };
    let Some(batch) = state.batches().get(batch_id) else {
        return false;
    };
    let Some(boundary) = state.blocks().get(batch.boundary_id()) else {
        return false;
    };

    let max_height = boundary.height();
    let min_height = if max_height == 0 {
        // A batch ending at height 0 is the genesis batch; it covers
        // exactly that height.
        0
    } else {
        let Some(parent) = state.blocks().get(batch.parent_boundary_id()) else {
            return false;
        };
        parent.height() + 1
    };

    height >= min_height && height <= max_height
}
