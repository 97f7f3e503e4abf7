//! One-time bootstrap of the chain state.

use tracing::*;

use trestle_state::{
    batch::{compute_batch_id, BatchRecord},
    block::{Block, BlockRecord},
    id::{BatchId, BlockId},
    ledger::SettlementState,
    tx::compute_txns_root,
};
use trestle_verifier::HeaderVerifier;

use crate::errors::Error;

/// Imports the genesis block, creating block 0 and the already-finalized
/// batch 0 around it.  Works exactly once: any set finalization frontier
/// means bootstrap already happened.
pub fn import_genesis<H: HeaderVerifier>(
    state: &mut SettlementState,
    block: &Block,
    checker: &H,
) -> Result<BatchId, Error> {
    if state.is_bootstrapped() {
        return Err(Error::AlreadyBootstrapped);
    }

    let header = block.header();
    if header.height() != 0 || !header.parent().is_null() || header.block_id().is_null() {
        return Err(Error::InvalidGenesisShape);
    }

    if !checker.verify_header(header) {
        return Err(Error::InvalidHeader(*header.block_id()));
    }

    let genesis_blkid = *header.block_id();
    let txns_root = compute_txns_root(block.txs());
    state
        .blocks_mut()
        .insert(genesis_blkid, BlockRecord::new(BlockId::null(), txns_root, 0, 0));

    // The genesis batch needs no proof; it's finalized the moment it exists.
    let batch_id = compute_batch_id(&genesis_blkid, &BlockId::null(), 0);
    let mut batch = BatchRecord::new(genesis_blkid, BlockId::null(), 0);
    batch.set_finalized();
    state.batches_mut().insert(batch_id, batch);
    state.finalized_mut().record_finalized(0, batch_id);

    info!(?genesis_blkid, ?batch_id, "imported genesis block");
    Ok(batch_id)
}
