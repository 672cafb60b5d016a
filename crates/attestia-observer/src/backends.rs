use async_trait::async_trait;
use attestia_core::AttestiaError;

use crate::backend::MockObserver;
use crate::mock::MockChainData;
use crate::observer::Observer;
use crate::types::{
    BalanceQuery, BalanceResult, ChainFamily, ChainStatus, ObserverConfig, TokenBalanceQuery,
    TransferEvent, TransfersQuery,
};

macro_rules! chain_observer {
    ($name:ident, $family:expr) => {
        pub struct $name(MockObserver);

        impl $name {
            pub fn new(config: ObserverConfig, data: MockChainData) -> Result<Self, AttestiaError> {
                Ok(Self(MockObserver::new(config, $family, data)?))
            }
        }

        #[async_trait]
        impl Observer for $name {
            async fn connect(&self) -> Result<(), AttestiaError> {
                self.0.connect().await
            }
            async fn disconnect(&self) -> Result<(), AttestiaError> {
                self.0.disconnect().await
            }
            async fn get_status(&self) -> ChainStatus {
                self.0.get_status().await
            }
            async fn get_balance(&self, query: BalanceQuery) -> Result<BalanceResult, AttestiaError> {
                self.0.get_balance(query).await
            }
            async fn get_token_balance(
                &self,
                query: TokenBalanceQuery,
            ) -> Result<BalanceResult, AttestiaError> {
                self.0.get_token_balance(query).await
            }
            async fn get_transfers(
                &self,
                query: TransfersQuery,
            ) -> Result<Vec<TransferEvent>, AttestiaError> {
                self.0.get_transfers(query).await
            }
        }
    };
}

chain_observer!(EvmObserver, ChainFamily::Evm);
chain_observer!(SolanaObserver, ChainFamily::Solana);
chain_observer!(XrplObserver, ChainFamily::Xrpl);
