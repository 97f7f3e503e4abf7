//! Settlement-layer bookkeeping for a rollup chain: the authoritative record
//! of committed blocks and batches, proof-gated finalization, reverts of
//! unproven work, and the cross-layer message outbox.

pub mod chain;
pub mod commit;
pub mod errors;
pub mod finalize;
pub mod genesis;
pub mod revert;

pub use chain::SettlementChain;
pub use errors::Error;
