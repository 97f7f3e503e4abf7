//! The L2-to-L1 message outbox.
//!
//! Only fingerprints are kept on the settlement layer.  The relaying process
//! on the other side re-derives the fingerprint from the full message it
//! carries and checks it against the position it claims.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use trestle_primitives::{buf::Buf32, hash};

use crate::id::AccountId;

/// A cross-layer message queued for relay.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct OutboxMessage {
    /// Account the message originates from.
    sender: AccountId,

    /// Account the message is addressed to on the other layer.
    target: AccountId,

    /// Value carried along with the message.
    value: u64,

    /// Fee offered to whoever relays the message.
    fee: u64,

    /// Latest time the message is valid to relay.
    deadline: u64,

    /// Opaque calldata for the target.
    payload: Vec<u8>,

    /// Gas allowance for executing the message on the other side.
    gas_limit: u64,
}

impl OutboxMessage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: AccountId,
        target: AccountId,
        value: u64,
        fee: u64,
        deadline: u64,
        payload: Vec<u8>,
        gas_limit: u64,
    ) -> Self {
        Self {
            sender,
            target,
            value,
            fee,
            deadline,
            payload,
            gas_limit,
        }
    }

    pub fn sender(&self) -> &AccountId {
        &self.sender
    }

    pub fn target(&self) -> &AccountId {
        &self.target
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Computes the fingerprint of the message at a particular queue
    /// position.  The position is part of the preimage, so the same message
    /// queued twice yields distinct fingerprints.
    pub fn compute_fingerprint(&self, position: u64) -> Buf32 {
        let preimage = MessagePreimage {
            message: self,
            position,
        };
        hash::compute_borsh_hash(&preimage)
    }
}

#[derive(BorshSerialize)]
struct MessagePreimage<'a> {
    message: &'a OutboxMessage,
    position: u64,
}

/// Append-only log of message fingerprints, by queue position.
#[derive(Clone, Debug, Eq, PartialEq, BorshDeserialize, BorshSerialize)]
pub struct MessageOutbox {
    /// Fingerprint of each message ever queued, indexed by position.
    fingerprints: Vec<Buf32>,

    /// Position of the next message to be relayed.  Advanced by the relay
    /// machinery downstream of us, never from in here.
    pending_relay_idx: u64,
}

impl MessageOutbox {
    pub fn new_empty() -> Self {
        Self {
            fingerprints: Vec::new(),
            pending_relay_idx: 0,
        }
    }

    /// Number of messages ever queued.
    pub fn len(&self) -> u64 {
        self.fingerprints.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// The position the next appended message will take.
    pub fn next_position(&self) -> u64 {
        self.len()
    }

    /// Appends a fingerprint, returning the position it was assigned.
    pub fn append(&mut self, fingerprint: Buf32) -> u64 {
        let position = self.next_position();
        self.fingerprints.push(fingerprint);
        position
    }

    /// Fingerprint of the message at the given position, if one has been
    /// queued there.
    pub fn fingerprint_at(&self, position: u64) -> Option<&Buf32> {
        self.fingerprints.get(position as usize)
    }

    pub fn pending_relay_idx(&self) -> u64 {
        self.pending_relay_idx
    }
}

impl Default for MessageOutbox {
    fn default() -> Self {
        Self::new_empty()
    }
}
