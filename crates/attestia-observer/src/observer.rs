use async_trait::async_trait;
use attestia_core::AttestiaError;

use crate::types::{
    BalanceQuery, BalanceResult, ChainStatus, TokenBalanceQuery, TransferEvent, TransfersQuery,
};

/// The one interface every chain back-end (EVM, Solana, XRPL, ...)
/// implements (C6). Fail-closed: queries issued before `connect()` or
/// after `disconnect()` fail with `NotConnected`, and a partial failure
/// inside a batched fetch fails the whole call rather than returning
/// partial data.
#[async_trait]
pub trait Observer: Send + Sync {
    async fn connect(&self) -> Result<(), AttestiaError>;

    /// Idempotent: disconnecting an already-disconnected observer succeeds.
    async fn disconnect(&self) -> Result<(), AttestiaError>;

    /// Never fails: underlying transport errors are caught and reported as
    /// `{connected: false}` rather than propagated.
    async fn get_status(&self) -> ChainStatus;

    async fn get_balance(&self, query: BalanceQuery) -> Result<BalanceResult, AttestiaError>;

    async fn get_token_balance(&self, query: TokenBalanceQuery) -> Result<BalanceResult, AttestiaError>;

    /// Returns transfers sorted ascending by `(blockNumber, txHash)`
    /// regardless of RPC reply order, deterministically across replays
    /// modulo `observedAt`.
    async fn get_transfers(&self, query: TransfersQuery) -> Result<Vec<TransferEvent>, AttestiaError>;
}
