//! Types making up the settlement-layer view of the rollup chain.
//!
//! Everything the chain's execution actually does is out of scope here;
//! these types only capture what the settlement layer has to remember to
//! judge commitments, finalization, and reverts.

pub mod batch;
pub mod block;
pub mod event;
pub mod id;
pub mod ledger;
pub mod outbox;
pub mod roles;
pub mod tx;

pub mod prelude;
