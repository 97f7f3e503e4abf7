//! Batch commitment.
//!
//! Commitment runs in two passes.  The first walks the proposal and checks
//! everything that could reject it, staging the records it would write; the
//! second applies the staged writes.  Nothing touches the ledgers until the
//! whole proposal has checked out, so a rejected proposal leaves no trace.

use std::collections::HashSet;

use tracing::*;

use trestle_state::{
    batch::{compute_batch_id, BatchProposal, BatchRecord},
    block::{Block, BlockRecord},
    event::BatchEventInfo,
    id::BlockId,
    ledger::SettlementState,
    tx::compute_txns_root,
};
use trestle_verifier::HeaderVerifier;

use crate::errors::Error;

/// Commits a proposed batch, extending the block ledger by its blocks and
/// the batch ledger by one unfinalized batch.
pub fn commit_batch<H: HeaderVerifier>(
    state: &mut SettlementState,
    proposal: &BatchProposal,
    checker: &H,
) -> Result<BatchEventInfo, Error> {
    let blocks = proposal.blocks();
    let last = blocks.last().ok_or(Error::EmptyBatch)?;
    let boundary_id = *last.header().block_id();
    let parent_boundary_id = *proposal.parent_boundary_id();
    let idx = proposal.idx();

    let batch_id = compute_batch_id(&boundary_id, &parent_boundary_id, idx);
    if state.batches().contains(&batch_id) {
        return Err(Error::DuplicateBatch(batch_id));
    }

    let parent = state
        .blocks()
        .get(&parent_boundary_id)
        .ok_or(Error::ParentNotCommitted(parent_boundary_id))?;

    let exp_idx = parent.batch_idx() + 1;
    if idx != exp_idx {
        return Err(Error::BatchIndexMismatch(exp_idx, idx));
    }

    let staged = check_blocks(state, blocks, &parent_boundary_id, parent.height(), idx, checker)?;

    // All checks passed; apply.
    for (blkid, record) in staged {
        state.blocks_mut().insert(blkid, record);
    }
    state
        .batches_mut()
        .insert(batch_id, BatchRecord::new(boundary_id, parent_boundary_id, idx));

    debug!(?batch_id, %idx, blocks = blocks.len(), "committed batch");
    Ok(BatchEventInfo::new(batch_id, boundary_id, parent_boundary_id, idx))
}

/// Validation pass over the proposal's blocks.  Checks each header's
/// integrity, linkage, height, and novelty, and stages the record it would
/// store.  Mutates nothing.
fn check_blocks<H: HeaderVerifier>(
    state: &SettlementState,
    blocks: &[Block],
    parent_boundary_id: &BlockId,
    parent_height: u64,
    batch_idx: u64,
    checker: &H,
) -> Result<Vec<(BlockId, BlockRecord)>, Error> {
    let mut staged = Vec::with_capacity(blocks.len());
    let mut seen = HashSet::new();
    let mut exp_parent = *parent_boundary_id;
    let mut exp_height = parent_height + 1;

    for block in blocks {
        let header = block.header();
        let blkid = *header.block_id();

        if !checker.verify_header(header) {
            return Err(Error::InvalidHeader(blkid));
        }

        if *header.parent() != exp_parent {
            return Err(Error::ParentLinkMismatch(exp_parent, *header.parent()));
        }

        if header.height() != exp_height {
            return Err(Error::HeightMismatch(exp_height, header.height()));
        }

        // A block is a duplicate whether the earlier copy is already in the
        // ledger or earlier in this same proposal.
        if state.blocks().contains(&blkid) || !seen.insert(blkid) {
            return Err(Error::DuplicateBlock(blkid));
        }

        let txns_root = compute_txns_root(block.txs());
        staged.push((
            blkid,
            BlockRecord::new(*header.parent(), txns_root, exp_height, batch_idx),
        ));

        exp_parent = blkid;
        exp_height += 1;
    }

    Ok(staged)
}
