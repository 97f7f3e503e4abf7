//! Privileged role assignments.
//!
//! The authorization model is deliberately simple: one identity per role,
//! checked by equality.  Every restricted operation consults exactly one of
//! these.

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::id::AccountId;

/// The identities holding each privileged role.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshDeserialize, BorshSerialize, Serialize, Deserialize,
)]
pub struct RoleTable {
    /// Bootstraps the chain and reassigns the other roles.
    owner: AccountId,

    /// Commits, finalizes, and reverts batches.
    operator: AccountId,

    /// Appends messages to the outbox.
    messenger: AccountId,
}

impl RoleTable {
    pub fn new(owner: AccountId, operator: AccountId, messenger: AccountId) -> Self {
        Self {
            owner,
            operator,
            messenger,
        }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn operator(&self) -> &AccountId {
        &self.operator
    }

    pub fn messenger(&self) -> &AccountId {
        &self.messenger
    }

    pub fn is_owner(&self, who: &AccountId) -> bool {
        self.owner == *who
    }

    pub fn is_operator(&self, who: &AccountId) -> bool {
        self.operator == *who
    }

    pub fn is_messenger(&self, who: &AccountId) -> bool {
        self.messenger == *who
    }

    /// Swaps in a new operator, returning the previous one.
    pub fn set_operator(&mut self, new_operator: AccountId) -> AccountId {
        std::mem::replace(&mut self.operator, new_operator)
    }

    /// Swaps in a new messenger, returning the previous one.
    pub fn set_messenger(&mut self, new_messenger: AccountId) -> AccountId {
        std::mem::replace(&mut self.messenger, new_messenger)
    }
}
