//! Global parameters of the rollup chain being tracked.

/// Parameters fixed when the settlement contract is deployed that don't
/// change for the lifetime of the chain.
#[derive(Clone, Debug)]
pub struct RollupParams {
    /// Chain ID of the L2 chain.
    pub chain_id: u64,

    /// Gas allowance for a single L2 block.
    pub block_gas_limit: u64,
}

impl RollupParams {
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Gas limit policy for the block at the given height.  Constant for now,
    /// but the height stays in the signature so the policy can vary later
    /// without touching callers.
    pub fn gas_limit_at(&self, _height: u64) -> u64 {
        self.block_gas_limit
    }
}
