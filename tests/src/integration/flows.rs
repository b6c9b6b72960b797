//! # Integration Test Flows
//!
//! ## Flows Tested:
//!
//! 1. **Mining**: headers mined with nonce search are accepted and applied
//! 2. **Deferred uncles**: an unknown uncle defers the block until it arrives
//! 3. **Rejection**: bad proof of work and early timestamps are permanent
//! 4. **Concurrency**: sibling blocks validated in parallel share the uncle window

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{decode_wire_hash, TestChain, GENESIS_NEXT_DIFFICULTY};
    use ghost_consensus::{
        derive_target, is_acceptable, pow_input, BlockStatus, ConsensusConfig,
        GhostConsensusApi, MissingUnclesEvent, Sha256dPowHasher,
    };
    use shared_types::Hash;
    use std::collections::HashSet;
    use std::sync::Arc;

    // =============================================================================
    // MINING
    // =============================================================================

    #[tokio::test]
    async fn test_mined_chain_reaches_block_status() {
        let chain = TestChain::new();
        let mut parent = chain.genesis_hash;
        let mut last_work = 0.0;

        for miner in 1..=5u8 {
            let header = chain.mine_on(parent, 20_000, miner);
            let result = chain.submit(&header, true).await.unwrap();

            assert_eq!(result.status, BlockStatus::Block);
            let record = result.record.unwrap();
            assert_eq!(record.height, miner as u64);
            assert!(record.total_work > last_work);
            assert!(record.hashrate() > 0.0);

            last_work = record.total_work;
            parent = header.hash();
        }

        let applied = chain.engine.applied();
        assert_eq!(applied.len(), 5);
        assert!(applied.iter().all(|b| b.reward == 120_000_000_000));
    }

    #[tokio::test]
    async fn test_mined_header_verifies() {
        let chain = TestChain::new();
        let header = chain.mine_on(chain.genesis_hash, 20_000, 1);

        let valid = chain
            .service
            .verify_proof_of_work(&header.pre_hash(), header.nonce, header.difficulty)
            .await
            .unwrap();
        assert!(valid);
        assert_eq!(header.difficulty, GENESIS_NEXT_DIFFICULTY);
    }

    // =============================================================================
    // DEFERRED UNCLES
    // =============================================================================

    #[tokio::test]
    async fn test_missing_uncle_resolved_on_retry() {
        let chain = TestChain::new();

        let b1 = chain.mine_on(chain.genesis_hash, 20_000, 1);
        chain.submit(&b1, true).await.unwrap();

        // Sibling of b1, not yet seen by this node
        let s1 = chain.mine_on(chain.genesis_hash, 21_000, 2);

        let mut b2 = chain.header_on(b1.hash(), 20_000, 3);
        b2.previous_hash.push(s1.hash());
        let b2 = chain.mine(b2);

        let deferred = chain.submit(&b2, true).await.unwrap();
        assert_eq!(deferred.status, BlockStatus::Header);
        assert_eq!(
            chain.sink.drain(),
            vec![MissingUnclesEvent::new(2, vec![s1.hash()])]
        );
        let header_work = deferred.record.unwrap().total_work;

        // Sync layer requests the uncle from a peer by its wire-encoded hash
        let requested = decode_wire_hash(&hex::encode(s1.hash())).unwrap();
        assert_eq!(requested, s1.hash());

        // Uncle arrives; the sync layer re-submits the block
        chain.submit(&s1, true).await.unwrap();
        let resolved = chain.submit(&b2, true).await.unwrap();

        assert_eq!(resolved.old_status, BlockStatus::Header);
        assert_eq!(resolved.status, BlockStatus::Block);
        let total_work = resolved.record.unwrap().total_work;
        assert!((total_work - (header_work + 1.0 / s1.difficulty)).abs() < 1e-9);
        assert_eq!(chain.sink.event_count(), 0);

        let last = chain.engine.applied().pop().unwrap();
        assert_eq!(last.uncles.len(), 1);
        assert_eq!(last.uncles[0].hash, s1.hash());
        assert_eq!(last.uncles[0].miner, [2u8; 20]);
    }

    // =============================================================================
    // REJECTION
    // =============================================================================

    #[test]
    fn test_truncated_wire_hash_refused() {
        let chain = TestChain::new();
        let truncated = hex::encode(&chain.genesis_hash[..31]);

        let err = decode_wire_hash(&truncated).unwrap_err();
        assert_eq!(err.actual, 31);
        assert_eq!(decode_wire_hash(&hex::encode(chain.genesis_hash)), Ok(chain.genesis_hash));
    }

    #[tokio::test]
    async fn test_tampered_nonce_rejected_permanently() {
        let chain = TestChain::new();
        let mut header = chain.mine_on(chain.genesis_hash, 20_000, 1);

        let target = derive_target(header.difficulty, 32);
        let pre_hash = header.pre_hash();
        header.nonce = (header.nonce + 1..)
            .find(|nonce| {
                let hash = Sha256dPowHasher::hash(&pow_input(&pre_hash, *nonce));
                !is_acceptable(&hash, &target).unwrap()
            })
            .unwrap();

        let first = chain.submit(&header, true).await.unwrap();
        assert_eq!(first.status, BlockStatus::Rejected);
        assert_eq!(chain.db.status(&header.hash()), BlockStatus::Rejected);

        let second = chain.submit(&header, true).await.unwrap();
        assert_eq!(second.old_status, BlockStatus::Rejected);
        assert_eq!(second.status, BlockStatus::Rejected);
        assert!(chain.engine.applied().is_empty());
    }

    #[tokio::test]
    async fn test_configured_block_spacing() {
        let config = ConsensusConfig::from_toml_str("min_block_spacing_ms = 1000").unwrap();
        let chain = TestChain::with_config(config);

        let early = chain.mine_on(chain.genesis_hash, 999, 1);
        let result = chain.submit(&early, false).await.unwrap();
        assert_eq!(result.status, BlockStatus::Rejected);

        let on_time = chain.mine_on(chain.genesis_hash, 1_000, 2);
        let result = chain.submit(&on_time, false).await.unwrap();
        assert_eq!(result.status, BlockStatus::Header);
    }

    #[tokio::test]
    async fn test_uncle_citing_rejected_header_is_invalid() {
        let chain = TestChain::new();
        let b1 = chain.mine_on(chain.genesis_hash, 20_000, 1);
        chain.submit(&b1, true).await.unwrap();

        let early = chain.mine_on(chain.genesis_hash, 10, 2);
        assert_eq!(
            chain.submit(&early, true).await.unwrap().status,
            BlockStatus::Rejected
        );

        let mut b2 = chain.header_on(b1.hash(), 20_000, 3);
        b2.previous_hash.push(early.hash());
        let b2 = chain.mine(b2);

        let result = chain.submit(&b2, true).await.unwrap();
        assert_eq!(result.status, BlockStatus::InvalidBlock);
        assert_eq!(chain.db.status(&b2.hash()), BlockStatus::InvalidBlock);
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_siblings_share_uncle_window() {
        let chain = Arc::new(TestChain::new());
        let siblings: Vec<_> = (1..=4u8)
            .map(|miner| chain.mine_on(chain.genesis_hash, 20_000 + miner as u64, miner))
            .collect();

        let handles: Vec<_> = siblings
            .iter()
            .cloned()
            .map(|header| {
                let chain = Arc::clone(&chain);
                tokio::spawn(async move { chain.submit(&header, true).await })
            })
            .collect();

        for result in futures::future::join_all(handles).await {
            assert_eq!(result.unwrap().unwrap().status, BlockStatus::Block);
        }

        let main: Hash = siblings[0].hash();
        let exclude: HashSet<Hash> = [main].into_iter().collect();
        let candidates = chain.service.uncle_candidates(2, &exclude);
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.height == 1 && c.hash != main));
    }
}
