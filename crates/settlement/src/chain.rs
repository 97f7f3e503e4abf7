//! Top-level handle over one chain's settlement state.

use tracing::*;

use trestle_primitives::{buf::Buf32, params::RollupParams};
use trestle_state::{
    batch::{BatchCommitment, BatchProposal, BatchRecord},
    block::{Block, BlockRecord},
    event::SettlementEvent,
    id::{AccountId, BatchId, BlockId},
    ledger::SettlementState,
    outbox::OutboxMessage,
    roles::RoleTable,
};
use trestle_verifier::{HeaderVerifier, Proof, ProofVerifier, PublicValues};

use crate::{commit, errors::Error, finalize, genesis, revert};

/// The settlement layer's view of one rollup chain.
///
/// Owns the chain state and funnels every mutation through a role check.  An
/// operation either applies completely, leaving any events it produced in the
/// pending buffer, or fails without touching state.  Callers drain the buffer
/// with [`take_events`](Self::take_events) and dispatch however they like.
pub struct SettlementChain<H, V> {
    params: RollupParams,
    state: SettlementState,
    header_verifier: H,
    proof_verifier: V,
    pending_events: Vec<SettlementEvent>,
}

impl<H: HeaderVerifier, V: ProofVerifier> SettlementChain<H, V> {
    pub fn new(
        params: RollupParams,
        roles: RoleTable,
        header_verifier: H,
        proof_verifier: V,
    ) -> Self {
        Self {
            params,
            state: SettlementState::new(roles),
            header_verifier,
            proof_verifier,
            pending_events: Vec::new(),
        }
    }

    fn require_owner(&self, caller: &AccountId) -> Result<(), Error> {
        if !self.state.roles().is_owner(caller) {
            return Err(Error::Unauthorized(*caller));
        }
        Ok(())
    }

    fn require_operator(&self, caller: &AccountId) -> Result<(), Error> {
        if !self.state.roles().is_operator(caller) {
            return Err(Error::Unauthorized(*caller));
        }
        Ok(())
    }

    fn require_messenger(&self, caller: &AccountId) -> Result<(), Error> {
        if !self.state.roles().is_messenger(caller) {
            return Err(Error::Unauthorized(*caller));
        }
        Ok(())
    }

    /// Imports the genesis block, establishing batch 0 as finalized.  Owner
    /// only, and only once.
    pub fn import_genesis(&mut self, caller: &AccountId, block: &Block) -> Result<BatchId, Error> {
        self.require_owner(caller)?;
        genesis::import_genesis(&mut self.state, block, &self.header_verifier)
    }

    /// Commits a proposed batch of blocks on top of the committed chain,
    /// returning the new batch's identity.  Operator only.
    pub fn commit_batch(
        &mut self,
        caller: &AccountId,
        proposal: &BatchProposal,
    ) -> Result<BatchId, Error> {
        self.require_operator(caller)?;
        let info = commit::commit_batch(&mut self.state, proposal, &self.header_verifier)?;
        let batch_id = *info.batch_id();
        self.pending_events
            .push(SettlementEvent::BatchCommitted(info));
        Ok(batch_id)
    }

    /// Finalizes a committed batch by checking its validity proof.  Operator
    /// only.
    pub fn finalize_batch(
        &mut self,
        caller: &AccountId,
        batch_id: &BatchId,
        proof: &Proof,
        public_values: &PublicValues,
    ) -> Result<(), Error> {
        self.require_operator(caller)?;
        let info = finalize::finalize_batch(
            &mut self.state,
            batch_id,
            proof,
            public_values,
            &self.proof_verifier,
        )?;
        self.pending_events
            .push(SettlementEvent::BatchFinalized(info));
        Ok(())
    }

    /// Reverts an unfinalized batch, deleting its blocks, and returns how
    /// many were deleted.  Operator only.
    pub fn revert_batch(&mut self, caller: &AccountId, batch_id: &BatchId) -> Result<u64, Error> {
        self.require_operator(caller)?;
        let deleted = revert::revert_batch(&mut self.state, batch_id)?;
        self.pending_events
            .push(SettlementEvent::BatchReverted(*batch_id));
        Ok(deleted)
    }

    /// Queues a message's fingerprint in the outbox and returns the position
    /// it was assigned.  Messenger only.
    pub fn append_message(
        &mut self,
        caller: &AccountId,
        message: &OutboxMessage,
    ) -> Result<u64, Error> {
        self.require_messenger(caller)?;
        let fingerprint = message.compute_fingerprint(self.state.outbox().next_position());
        let position = self.state.outbox_mut().append(fingerprint);
        debug!(%position, ?fingerprint, "queued outbox message");
        Ok(position)
    }

    /// Hands the operator role to a different identity.  Owner only;
    /// reassigning the role to its current holder is refused.
    pub fn set_operator(
        &mut self,
        caller: &AccountId,
        new_operator: AccountId,
    ) -> Result<(), Error> {
        self.require_owner(caller)?;
        if self.state.roles().is_operator(&new_operator) {
            return Err(Error::RoleUnchanged);
        }
        let prev = self.state.roles_mut().set_operator(new_operator);
        info!(?prev, new = ?new_operator, "operator changed");
        self.pending_events
            .push(SettlementEvent::OperatorChanged(prev, new_operator));
        Ok(())
    }

    /// Hands the messenger role to a different identity.  Owner only;
    /// reassigning the role to its current holder is refused.
    pub fn set_messenger(
        &mut self,
        caller: &AccountId,
        new_messenger: AccountId,
    ) -> Result<(), Error> {
        self.require_owner(caller)?;
        if self.state.roles().is_messenger(&new_messenger) {
            return Err(Error::RoleUnchanged);
        }
        let prev = self.state.roles_mut().set_messenger(new_messenger);
        info!(?prev, new = ?new_messenger, "messenger changed");
        self.pending_events
            .push(SettlementEvent::MessengerChanged(prev, new_messenger));
        Ok(())
    }

    pub fn chain_id(&self) -> u64 {
        self.params.chain_id()
    }

    /// The gas limit policy's answer for a block at the given height.
    pub fn gas_limit_at(&self, height: u64) -> u64 {
        self.params.gas_limit_at(height)
    }

    pub fn block_record(&self, id: &BlockId) -> Option<&BlockRecord> {
        self.state.blocks().get(id)
    }

    pub fn batch_record(&self, id: &BatchId) -> Option<&BatchRecord> {
        self.state.batches().get(id)
    }

    pub fn finalized_batch_at(&self, idx: u64) -> Option<&BatchId> {
        self.state.finalized().batch_at(idx)
    }

    pub fn finalization_frontier(&self) -> Option<&BatchCommitment> {
        self.state.finalized().frontier()
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.state.is_bootstrapped()
    }

    /// Number of messages ever queued in the outbox.
    pub fn outbox_len(&self) -> u64 {
        self.state.outbox().len()
    }

    /// Fingerprint queued at a position, or [`Error::OutOfRange`] if nothing
    /// has been queued there.
    pub fn message_fingerprint(&self, position: u64) -> Result<Buf32, Error> {
        self.state
            .outbox()
            .fingerprint_at(position)
            .copied()
            .ok_or(Error::OutOfRange(position))
    }

    pub fn pending_relay_index(&self) -> u64 {
        self.state.outbox().pending_relay_idx()
    }

    /// Whether a height falls inside the span the finalized batch at `idx`
    /// covers.
    pub fn verify_height_in_finalized_batch(&self, idx: u64, height: u64) -> bool {
        finalize::verify_height_in_finalized_batch(&self.state, idx, height)
    }

    /// Drains the pending events, in the order the operations produced them.
    pub fn take_events(&mut self) -> Vec<SettlementEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn state(&self) -> &SettlementState {
        &self.state
    }
}
