//! Generators for settlement chain structures shared across tests.

use trestle_primitives::{buf::Buf20, hash, params::RollupParams};
use trestle_state::{
    batch::BatchProposal,
    block::{Block, BlockHeader},
    id::{AccountId, BlockId},
    roles::RoleTable,
};

pub fn gen_params() -> RollupParams {
    RollupParams {
        chain_id: 2718,
        block_gas_limit: 30_000_000,
    }
}

/// A distinct account derived from a seed byte.
pub fn gen_account(seed: u8) -> AccountId {
    AccountId::from(Buf20::new([seed; 20]))
}

/// A role table over accounts 1, 2, 3 as owner, operator, messenger.
pub fn gen_roles() -> RoleTable {
    RoleTable::new(gen_account(1), gen_account(2), gen_account(3))
}

/// A deterministic block ID derived from a height and a salt, so different
/// test chains at the same heights don't collide.
pub fn gen_block_id(height: u64, salt: u64) -> BlockId {
    BlockId::from(hash::compute_borsh_hash(&(height, salt)))
}

/// The genesis block every test chain starts from.
pub fn gen_genesis_block() -> Block {
    let header = BlockHeader::new(gen_block_id(0, 0), BlockId::null(), 0);
    Block::new(header, Vec::new())
}

/// A run of `count` empty blocks extending `parent`, correctly linked.
pub fn gen_chain(parent: &BlockHeader, count: usize, salt: u64) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(count);
    let mut parent_id = *parent.block_id();
    let mut height = parent.height();

    for _ in 0..count {
        height += 1;
        let header = BlockHeader::new(gen_block_id(height, salt), parent_id, height);
        parent_id = *header.block_id();
        blocks.push(Block::new(header, Vec::new()));
    }

    blocks
}

/// A well-formed proposal of `count` blocks extending `parent` at `idx`.
pub fn gen_proposal(parent: &BlockHeader, idx: u64, count: usize, salt: u64) -> BatchProposal {
    BatchProposal::new(*parent.block_id(), idx, gen_chain(parent, count, salt))
}
