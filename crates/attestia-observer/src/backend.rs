use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use attestia_core::AttestiaError;
use chrono::Utc;

use crate::mock::{resolve_records, MockChainData};
use crate::observer::Observer;
use crate::types::{
    BalanceQuery, BalanceResult, ChainFamily, ChainStatus, ObserverConfig, TokenBalanceQuery,
    TransferDirection, TransferEvent, TransfersQuery,
};

/// Shared mock-backed `Observer` implementation parametrised by
/// `ChainFamily`. `EvmObserver`, `SolanaObserver`, and `XrplObserver` are
/// thin newtypes over this so each still has a distinct Rust type at the
/// API boundary while sharing one fail-closed/determinism implementation.
pub struct MockObserver {
    config: ObserverConfig,
    connected: AtomicBool,
    data: Mutex<MockChainData>,
}

impl MockObserver {
    pub fn new(config: ObserverConfig, family: ChainFamily, data: MockChainData) -> Result<Self, AttestiaError> {
        if config.family != family {
            return Err(AttestiaError::InvalidInput(format!(
                "ChainMismatch: observer family {family:?} does not accept chain configured as {:?}",
                config.family
            )));
        }
        Ok(Self {
            config,
            connected: AtomicBool::new(false),
            data: Mutex::new(data),
        })
    }

    fn require_connected(&self) -> Result<(), AttestiaError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(AttestiaError::NotConnected(format!(
                "observer for {} is not connected",
                self.config.chain_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Observer for MockObserver {
    async fn connect(&self) -> Result<(), AttestiaError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), AttestiaError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn get_status(&self) -> ChainStatus {
        if !self.connected.load(Ordering::SeqCst) {
            return ChainStatus {
                chain_id: self.config.chain_id.clone(),
                connected: false,
                latest_block: None,
                finalized_block: None,
                safe_block: None,
            };
        }
        let data = self.data.lock().unwrap();
        ChainStatus {
            chain_id: self.config.chain_id.clone(),
            connected: true,
            latest_block: data.latest_block,
            finalized_block: data.finalized_block,
            safe_block: data.safe_block,
        }
    }

    async fn get_balance(&self, query: BalanceQuery) -> Result<BalanceResult, AttestiaError> {
        self.require_connected()?;
        let data = self.data.lock().unwrap();
        let (balance, decimals, symbol, at_block) = data
            .balance
            .clone()
            .ok_or_else(|| AttestiaError::NotFound(format!("no balance for {}", query.address)))?;
        Ok(BalanceResult {
            chain_id: self.config.chain_id.clone(),
            balance,
            decimals,
            symbol,
            at_block,
        })
    }

    async fn get_token_balance(&self, query: TokenBalanceQuery) -> Result<BalanceResult, AttestiaError> {
        self.require_connected()?;
        let data = self.data.lock().unwrap();
        let (balance, decimals, symbol, at_block) = data
            .token_balances
            .get(&query.token)
            .cloned()
            .ok_or_else(|| AttestiaError::NotFound(format!("no token balance for {}", query.token)))?;
        Ok(BalanceResult {
            chain_id: self.config.chain_id.clone(),
            balance,
            decimals,
            symbol,
            at_block,
        })
    }

    async fn get_transfers(&self, query: TransfersQuery) -> Result<Vec<TransferEvent>, AttestiaError> {
        self.require_connected()?;
        let records = {
            let data = self.data.lock().unwrap();
            data.transfer_records.clone()
        };
        let mut events = resolve_records(&records)?;

        events.retain(|e| {
            let address_matches = match query.direction {
                Some(TransferDirection::Incoming) => e.to == query.address,
                Some(TransferDirection::Outgoing) => e.from == query.address,
                None => e.from == query.address || e.to == query.address,
            };
            if !address_matches {
                return false;
            }
            if let Some(token) = &query.token {
                if e.token.as_deref() != Some(token.as_str()) {
                    return false;
                }
            }
            if let Some(from_block) = query.from_block {
                if e.block_number < from_block {
                    return false;
                }
            }
            if let Some(to_block) = query.to_block {
                if e.block_number > to_block {
                    return false;
                }
            }
            true
        });

        events.sort_by(|a, b| (a.block_number, &a.tx_hash).cmp(&(b.block_number, &b.tx_hash)));
        let now = Utc::now();
        for e in &mut events {
            e.observed_at = now;
        }

        if let Some(limit) = query.limit {
            events.truncate(limit);
        }
        Ok(events)
    }
}
