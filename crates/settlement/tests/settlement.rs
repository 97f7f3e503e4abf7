use trestle_settlement::{Error, SettlementChain};
use trestle_state::{
    batch::BatchProposal,
    block::{Block, BlockHeader},
    event::{BatchEventInfo, SettlementEvent},
    id::{AccountId, BatchId, BlockId},
    outbox::OutboxMessage,
    tx::compute_txns_root,
};
use trestle_test_utils::chain::{
    gen_account, gen_block_id, gen_chain, gen_genesis_block, gen_params, gen_proposal, gen_roles,
};
use trestle_verifier::{NonEmptyProofVerifier, Proof, PublicValues, TrivialHeaderVerifier};

type TestChain = SettlementChain<TrivialHeaderVerifier, NonEmptyProofVerifier>;

fn owner() -> AccountId {
    gen_account(1)
}

fn operator() -> AccountId {
    gen_account(2)
}

fn messenger() -> AccountId {
    gen_account(3)
}

fn new_chain() -> TestChain {
    SettlementChain::new(
        gen_params(),
        gen_roles(),
        TrivialHeaderVerifier,
        NonEmptyProofVerifier,
    )
}

fn bootstrapped() -> (TestChain, Block) {
    let mut chain = new_chain();
    let gblock = gen_genesis_block();
    chain
        .import_genesis(&owner(), &gblock)
        .expect("test: import genesis");
    (chain, gblock)
}

/// Commits a well-formed run of blocks and returns the batch ID along with
/// the new boundary header for chaining further batches on top.
fn commit_run(
    chain: &mut TestChain,
    parent: &BlockHeader,
    idx: u64,
    count: usize,
    salt: u64,
) -> (BatchId, BlockHeader) {
    let blocks = gen_chain(parent, count, salt);
    let boundary = blocks.last().expect("test: empty run").header().clone();
    let proposal = BatchProposal::new(*parent.block_id(), idx, blocks);
    let batch_id = chain
        .commit_batch(&operator(), &proposal)
        .expect("test: commit batch");
    (batch_id, boundary)
}

fn good_proof() -> Proof {
    Proof::new(vec![1])
}

#[test]
fn test_genesis_establishes_finalized_batch() {
    let mut chain = new_chain();
    assert!(!chain.is_bootstrapped());

    let gblock = gen_genesis_block();
    let genesis_batch = chain.import_genesis(&owner(), &gblock).unwrap();

    assert!(chain.is_bootstrapped());
    let frontier = chain.finalization_frontier().unwrap();
    assert_eq!(frontier.idx(), 0);
    assert_eq!(*frontier.batch_id(), genesis_batch);
    assert_eq!(chain.finalized_batch_at(0), Some(&genesis_batch));

    let record = chain.batch_record(&genesis_batch).unwrap();
    assert!(record.is_finalized());
    assert_eq!(record.idx(), 0);
    assert_eq!(record.boundary_id(), gblock.header().block_id());
    assert!(record.parent_boundary_id().is_null());

    let block = chain.block_record(gblock.header().block_id()).unwrap();
    assert_eq!(block.height(), 0);
    assert!(block.parent_id().is_null());
    assert_eq!(block.batch_idx(), 0);

    // Bootstrap announces nothing.
    assert!(chain.take_events().is_empty());

    // And batch 0 needs no proof, so it never accepts one.
    let res = chain.finalize_batch(
        &operator(),
        &genesis_batch,
        &good_proof(),
        &PublicValues::default(),
    );
    assert!(matches!(res, Err(Error::AlreadyFinalized(_))));
}

#[test]
fn test_genesis_only_once() {
    let (mut chain, gblock) = bootstrapped();

    let res = chain.import_genesis(&owner(), &gblock);
    assert!(matches!(res, Err(Error::AlreadyBootstrapped)));

    // A different genesis block is refused all the same.
    let other = Block::new(
        BlockHeader::new(gen_block_id(0, 9), BlockId::null(), 0),
        Vec::new(),
    );
    let res = chain.import_genesis(&owner(), &other);
    assert!(matches!(res, Err(Error::AlreadyBootstrapped)));
}

#[test]
fn test_genesis_shape_rejected() {
    let mut chain = new_chain();

    let wrong_height = Block::new(
        BlockHeader::new(gen_block_id(1, 0), BlockId::null(), 1),
        Vec::new(),
    );
    let res = chain.import_genesis(&owner(), &wrong_height);
    assert!(matches!(res, Err(Error::InvalidGenesisShape)));

    let linked_parent = Block::new(
        BlockHeader::new(gen_block_id(0, 1), gen_block_id(7, 7), 0),
        Vec::new(),
    );
    let res = chain.import_genesis(&owner(), &linked_parent);
    assert!(matches!(res, Err(Error::InvalidGenesisShape)));

    let null_id = Block::new(
        BlockHeader::new(BlockId::null(), BlockId::null(), 0),
        Vec::new(),
    );
    let res = chain.import_genesis(&owner(), &null_id);
    assert!(matches!(res, Err(Error::InvalidGenesisShape)));

    assert!(!chain.is_bootstrapped());
    assert!(chain.state().blocks().is_empty());
}

#[test]
fn test_commit_records_batch_and_blocks() {
    let (mut chain, gblock) = bootstrapped();
    let genesis_id = *gblock.header().block_id();

    let p1 = gen_proposal(gblock.header(), 1, 3, 1);
    let batch1 = chain.commit_batch(&operator(), &p1).unwrap();

    let boundary_id = *p1.blocks().last().unwrap().header().block_id();
    let record = chain.batch_record(&batch1).unwrap();
    assert_eq!(*record.boundary_id(), boundary_id);
    assert_eq!(*record.parent_boundary_id(), genesis_id);
    assert_eq!(record.idx(), 1);
    assert!(!record.is_finalized());

    for block in p1.blocks() {
        let rec = chain.block_record(block.header().block_id()).unwrap();
        assert_eq!(rec.parent_id(), block.header().parent());
        assert_eq!(rec.height(), block.header().height());
        assert_eq!(rec.batch_idx(), 1);
        assert_eq!(*rec.txns_root(), compute_txns_root(block.txs()));
    }

    assert_eq!(
        chain.take_events(),
        vec![SettlementEvent::BatchCommitted(BatchEventInfo::new(
            batch1,
            boundary_id,
            genesis_id,
            1
        ))]
    );

    // Committed but unproven, so the frontier still sits at genesis.
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 0);
}

#[test]
fn test_commit_duplicate_batch_rejected() {
    let (mut chain, gblock) = bootstrapped();

    let p1 = gen_proposal(gblock.header(), 1, 3, 1);
    let batch1 = chain.commit_batch(&operator(), &p1).unwrap();
    chain.take_events();

    let before = chain.state().clone();
    let res = chain.commit_batch(&operator(), &p1);
    assert!(matches!(res, Err(Error::DuplicateBatch(dup)) if dup == batch1));
    assert_eq!(chain.state(), &before);
    assert!(chain.take_events().is_empty());
}

#[test]
fn test_commit_index_out_of_sequence() {
    let (mut chain, gblock) = bootstrapped();

    // The first batch after genesis must claim index 1.
    let p0 = gen_proposal(gblock.header(), 0, 2, 1);
    let res = chain.commit_batch(&operator(), &p0);
    assert!(matches!(res, Err(Error::BatchIndexMismatch(1, 0))));

    let p2 = gen_proposal(gblock.header(), 2, 2, 1);
    let res = chain.commit_batch(&operator(), &p2);
    assert!(matches!(res, Err(Error::BatchIndexMismatch(1, 2))));

    let (_batch1, boundary1) = commit_run(&mut chain, gblock.header(), 1, 2, 1);
    let skipped = gen_proposal(&boundary1, 3, 2, 2);
    let res = chain.commit_batch(&operator(), &skipped);
    assert!(matches!(res, Err(Error::BatchIndexMismatch(2, 3))));
}

#[test]
fn test_commit_unknown_parent() {
    let (mut chain, _gblock) = bootstrapped();

    let phantom = BlockHeader::new(gen_block_id(5, 77), gen_block_id(4, 77), 5);
    let proposal = gen_proposal(&phantom, 1, 2, 78);
    let res = chain.commit_batch(&operator(), &proposal);
    assert!(matches!(res, Err(Error::ParentNotCommitted(p)) if p == *phantom.block_id()));
}

#[test]
fn test_finalize_out_of_order_frontier() {
    let (mut chain, gblock) = bootstrapped();
    let (batch1, b1) = commit_run(&mut chain, gblock.header(), 1, 2, 1);
    let (batch2, b2) = commit_run(&mut chain, &b1, 2, 2, 2);
    let (batch3, _b3) = commit_run(&mut chain, &b2, 3, 2, 3);

    let values = PublicValues::default();
    chain
        .finalize_batch(&operator(), &batch3, &good_proof(), &values)
        .unwrap();
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 3);
    assert_eq!(chain.finalized_batch_at(3), Some(&batch3));
    assert_eq!(chain.finalized_batch_at(1), None);

    // Earlier proofs landing later never pull the frontier back.
    chain
        .finalize_batch(&operator(), &batch1, &good_proof(), &values)
        .unwrap();
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 3);
    assert_eq!(chain.finalized_batch_at(1), Some(&batch1));

    chain
        .finalize_batch(&operator(), &batch2, &good_proof(), &values)
        .unwrap();
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 3);
    assert_eq!(chain.finalized_batch_at(2), Some(&batch2));
}

#[test]
fn test_finalize_bad_proof_leaves_batch_open() {
    let (mut chain, gblock) = bootstrapped();
    let (batch1, _) = commit_run(&mut chain, gblock.header(), 1, 2, 1);
    chain.take_events();

    let values = PublicValues::default();
    let res = chain.finalize_batch(&operator(), &batch1, &Proof::default(), &values);
    assert!(matches!(res, Err(Error::ProofRejected(_))));
    assert!(!chain.batch_record(&batch1).unwrap().is_finalized());
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 0);
    assert!(chain.take_events().is_empty());

    // The batch stays open for a proof the verifier accepts.
    chain
        .finalize_batch(&operator(), &batch1, &good_proof(), &values)
        .unwrap();
    assert!(chain.batch_record(&batch1).unwrap().is_finalized());
    assert_eq!(chain.finalization_frontier().unwrap().idx(), 1);
}

#[test]
fn test_revert_restores_prior_state() {
    let (mut chain, gblock) = bootstrapped();
    let before = chain.state().clone();

    let p1 = gen_proposal(gblock.header(), 1, 3, 1);
    let batch1 = chain.commit_batch(&operator(), &p1).unwrap();
    assert_ne!(chain.state(), &before);
    chain.take_events();

    let deleted = chain.revert_batch(&operator(), &batch1).unwrap();
    assert_eq!(deleted, 3);
    assert_eq!(chain.state(), &before);
    assert_eq!(
        chain.take_events(),
        vec![SettlementEvent::BatchReverted(batch1)]
    );

    // The same proposal commits again cleanly, to the same identity.
    let recommitted = chain.commit_batch(&operator(), &p1).unwrap();
    assert_eq!(recommitted, batch1);
}

#[test]
fn test_finalize_after_revert_gone() {
    let (mut chain, gblock) = bootstrapped();
    let (batch1, _) = commit_run(&mut chain, gblock.header(), 1, 2, 1);

    chain.revert_batch(&operator(), &batch1).unwrap();

    let res = chain.finalize_batch(
        &operator(),
        &batch1,
        &good_proof(),
        &PublicValues::default(),
    );
    assert!(matches!(res, Err(Error::NoSuchBatch(_))));

    let res = chain.revert_batch(&operator(), &batch1);
    assert!(matches!(res, Err(Error::NoSuchBatch(_))));
}

#[test]
fn test_verify_height_spans() {
    let (mut chain, gblock) = bootstrapped();

    // The genesis batch covers exactly height 0.
    assert!(chain.verify_height_in_finalized_batch(0, 0));
    assert!(!chain.verify_height_in_finalized_batch(0, 1));

    let (batch1, b1) = commit_run(&mut chain, gblock.header(), 1, 3, 1);
    let (batch2, _b2) = commit_run(&mut chain, &b1, 2, 2, 2);

    // Nothing is attested for an unfinalized batch.
    assert!(!chain.verify_height_in_finalized_batch(1, 2));

    let values = PublicValues::default();
    chain
        .finalize_batch(&operator(), &batch1, &good_proof(), &values)
        .unwrap();
    assert!(chain.verify_height_in_finalized_batch(1, 1));
    assert!(chain.verify_height_in_finalized_batch(1, 3));
    assert!(!chain.verify_height_in_finalized_batch(1, 0));
    assert!(!chain.verify_height_in_finalized_batch(1, 4));

    chain
        .finalize_batch(&operator(), &batch2, &good_proof(), &values)
        .unwrap();
    assert!(chain.verify_height_in_finalized_batch(2, 4));
    assert!(chain.verify_height_in_finalized_batch(2, 5));
    assert!(!chain.verify_height_in_finalized_batch(2, 3));

    // An index nothing has finalized at.
    assert!(!chain.verify_height_in_finalized_batch(9, 0));
}

#[test]
fn test_outbox_append_and_query() {
    let (mut chain, _gblock) = bootstrapped();

    let msg_a = OutboxMessage::new(
        gen_account(7),
        gen_account(8),
        5,
        1,
        99,
        vec![1, 2, 3],
        21_000,
    );
    let msg_b = OutboxMessage::new(gen_account(8), gen_account(7), 0, 2, 120, Vec::new(), 50_000);

    assert_eq!(chain.append_message(&messenger(), &msg_a).unwrap(), 0);
    assert_eq!(chain.append_message(&messenger(), &msg_b).unwrap(), 1);
    // Queueing the same message again takes a fresh position and hashes to a
    // fresh fingerprint.
    assert_eq!(chain.append_message(&messenger(), &msg_a).unwrap(), 2);

    assert_eq!(chain.outbox_len(), 3);
    assert_eq!(
        chain.message_fingerprint(0).unwrap(),
        msg_a.compute_fingerprint(0)
    );
    assert_eq!(
        chain.message_fingerprint(1).unwrap(),
        msg_b.compute_fingerprint(1)
    );
    assert_ne!(
        chain.message_fingerprint(0).unwrap(),
        chain.message_fingerprint(2).unwrap()
    );
    assert!(matches!(
        chain.message_fingerprint(3),
        Err(Error::OutOfRange(3))
    ));

    // Relay progress belongs to the other layer; queueing never advances it.
    assert_eq!(chain.pending_relay_index(), 0);
}

#[test]
fn test_role_handoff() {
    let (mut chain, gblock) = bootstrapped();

    let res = chain.set_operator(&operator(), gen_account(4));
    assert!(matches!(res, Err(Error::Unauthorized(_))));

    let res = chain.set_operator(&owner(), operator());
    assert!(matches!(res, Err(Error::RoleUnchanged)));

    chain.set_operator(&owner(), gen_account(4)).unwrap();
    assert_eq!(
        chain.take_events(),
        vec![SettlementEvent::OperatorChanged(operator(), gen_account(4))]
    );

    // The old operator's authority is gone, the new one's works.
    let p1 = gen_proposal(gblock.header(), 1, 2, 1);
    let res = chain.commit_batch(&operator(), &p1);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    chain.commit_batch(&gen_account(4), &p1).unwrap();
    chain.take_events();

    chain.set_messenger(&owner(), gen_account(5)).unwrap();
    assert_eq!(
        chain.take_events(),
        vec![SettlementEvent::MessengerChanged(
            messenger(),
            gen_account(5)
        )]
    );

    let msg = OutboxMessage::new(gen_account(5), gen_account(6), 0, 0, 10, Vec::new(), 21_000);
    let res = chain.append_message(&messenger(), &msg);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    assert_eq!(chain.append_message(&gen_account(5), &msg).unwrap(), 0);
}

#[test]
fn test_unauthorized_callers_change_nothing() {
    let (mut chain, gblock) = bootstrapped();
    let (batch1, boundary1) = commit_run(&mut chain, gblock.header(), 1, 2, 1);
    chain.take_events();
    let before = chain.state().clone();

    let outsider = gen_account(9);
    let p2 = gen_proposal(&boundary1, 2, 2, 2);
    let msg = OutboxMessage::new(outsider, outsider, 0, 0, 10, vec![0xaa], 21_000);
    let values = PublicValues::default();

    let res = chain.import_genesis(&outsider, &gen_genesis_block());
    assert!(matches!(res, Err(Error::Unauthorized(who)) if who == outsider));
    let res = chain.commit_batch(&outsider, &p2);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.finalize_batch(&outsider, &batch1, &good_proof(), &values);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.revert_batch(&outsider, &batch1);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.append_message(&outsider, &msg);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.set_operator(&outsider, outsider);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.set_messenger(&outsider, outsider);
    assert!(matches!(res, Err(Error::Unauthorized(_))));

    // Holding one role grants nothing about another.
    let res = chain.commit_batch(&messenger(), &p2);
    assert!(matches!(res, Err(Error::Unauthorized(_))));
    let res = chain.append_message(&operator(), &msg);
    assert!(matches!(res, Err(Error::Unauthorized(_))));

    assert_eq!(chain.state(), &before);
    assert!(chain.take_events().is_empty());
}

#[test]
fn test_events_drain_in_order() {
    let mut chain = new_chain();
    let gblock = gen_genesis_block();
    chain.import_genesis(&owner(), &gblock).unwrap();
    assert!(chain.take_events().is_empty());

    let (batch1, _) = commit_run(&mut chain, gblock.header(), 1, 2, 1);
    chain
        .finalize_batch(
            &operator(),
            &batch1,
            &good_proof(),
            &PublicValues::default(),
        )
        .unwrap();
    chain.set_operator(&owner(), gen_account(4)).unwrap();

    let events = chain.take_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], SettlementEvent::BatchCommitted(_)));
    assert!(matches!(events[1], SettlementEvent::BatchFinalized(_)));
    assert!(matches!(events[2], SettlementEvent::OperatorChanged(_, _)));
    assert!(chain.take_events().is_empty());
}

#[test]
fn test_params_queries() {
    let chain = new_chain();
    assert_eq!(chain.chain_id(), 2718);
    assert_eq!(chain.gas_limit_at(0), 30_000_000);
    assert_eq!(chain.gas_limit_at(1_000_000), 30_000_000);
}
