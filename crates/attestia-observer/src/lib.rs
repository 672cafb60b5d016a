pub mod backend;
pub mod backends;
pub mod mock;
pub mod observer;
pub mod types;

pub use backends::{EvmObserver, SolanaObserver, XrplObserver};
pub use mock::{MockChainData, MockRecord};
pub use observer::Observer;
pub use types::{
    BalanceQuery, BalanceResult, ChainFamily, ChainStatus, Finality, ObserverConfig,
    TokenBalanceQuery, TransferDirection, TransferEvent, TransfersQuery,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config(family: ChainFamily) -> ObserverConfig {
        ObserverConfig {
            chain_id: "test-chain".into(),
            family,
            rpc_url: "https://example.invalid".into(),
            timeout: std::time::Duration::from_secs(5),
        }
    }

    fn transfer(tx_hash: &str, block: u64, to: &str) -> TransferEvent {
        TransferEvent {
            chain_id: "test-chain".into(),
            tx_hash: tx_hash.into(),
            block_number: block,
            from: "alice".into(),
            to: to.into(),
            amount: "100.000000".into(),
            decimals: 6,
            symbol: "USDC".into(),
            token: None,
            timestamp: Utc::now(),
            observed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn queries_before_connect_fail_closed() {
        let observer = SolanaObserver::new(config(ChainFamily::Solana), MockChainData::default()).unwrap();
        let err = observer
            .get_balance(BalanceQuery {
                address: "addr".into(),
                finality: None,
            })
            .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn status_never_throws_when_disconnected() {
        let observer = SolanaObserver::new(config(ChainFamily::Solana), MockChainData::default()).unwrap();
        let status = observer.get_status().await;
        assert!(!status.connected);
    }

    #[tokio::test]
    async fn constructor_rejects_family_mismatch() {
        let err = EvmObserver::new(config(ChainFamily::Solana), MockChainData::default());
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn transfers_sort_ascending_by_block_then_hash_deterministically() {
        let data = MockChainData::default().with_records(vec![
            MockRecord::Transfer(transfer("sig-1", 100, "addr")),
            MockRecord::Transfer(transfer("sig-2", 50, "addr")),
            MockRecord::Transfer(transfer("sig-3", 200, "addr")),
        ]);
        let observer_a = SolanaObserver::new(config(ChainFamily::Solana), data).unwrap();
        observer_a.connect().await.unwrap();

        let data_b = MockChainData::default().with_records(vec![
            MockRecord::Transfer(transfer("sig-1", 100, "addr")),
            MockRecord::Transfer(transfer("sig-2", 50, "addr")),
            MockRecord::Transfer(transfer("sig-3", 200, "addr")),
        ]);
        let observer_b = SolanaObserver::new(config(ChainFamily::Solana), data_b).unwrap();
        observer_b.connect().await.unwrap();

        let query = TransfersQuery {
            address: "addr".into(),
            ..Default::default()
        };
        let a = observer_a.get_transfers(query.clone()).await.unwrap();
        let b = observer_b.get_transfers(query).await.unwrap();

        let blocks: Vec<u64> = a.iter().map(|t| t.block_number).collect();
        assert_eq!(blocks, vec![50, 100, 200]);

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.tx_hash, y.tx_hash);
            assert_eq!(x.block_number, y.block_number);
            assert_eq!(x.amount, y.amount);
        }
    }

    #[tokio::test]
    async fn dropped_and_unrecognised_records_are_silently_skipped() {
        let data = MockChainData::default().with_records(vec![
            MockRecord::Transfer(transfer("sig-1", 1, "addr")),
            MockRecord::Dropped,
            MockRecord::Unrecognised,
        ]);
        let observer = EvmObserver::new(config(ChainFamily::Evm), data).unwrap();
        observer.connect().await.unwrap();
        let transfers = observer
            .get_transfers(TransfersQuery {
                address: "addr".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(transfers.len(), 1);
    }

    #[tokio::test]
    async fn partial_fetch_failure_fails_the_whole_batch() {
        let data = MockChainData::default().with_records(vec![
            MockRecord::Transfer(transfer("sig-1", 1, "addr")),
            MockRecord::FetchFailed("timeout".into()),
        ]);
        let observer = EvmObserver::new(config(ChainFamily::Evm), data).unwrap();
        observer.connect().await.unwrap();
        let err = observer
            .get_transfers(TransfersQuery {
                address: "addr".into(),
                ..Default::default()
            })
            .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn disconnect_is_idempotent_and_blocks_further_queries() {
        let observer = XrplObserver::new(config(ChainFamily::Xrpl), MockChainData::default()).unwrap();
        observer.connect().await.unwrap();
        observer.disconnect().await.unwrap();
        observer.disconnect().await.unwrap();
        let err = observer
            .get_balance(BalanceQuery {
                address: "r...".into(),
                finality: None,
            })
            .await;
        assert!(err.is_err());
    }
}
