use attestia_core::Timestamp;
use serde::{Deserialize, Serialize};

/// Back-end family a `ChainId` belongs to. Constructors reject a
/// configuration whose chain does not belong to their family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    Evm,
    Solana,
    Xrpl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finality {
    Latest,
    Safe,
    Finalized,
}

impl Default for Finality {
    fn default() -> Self {
        Finality::Latest
    }
}

#[derive(Clone, Debug)]
pub struct ObserverConfig {
    pub chain_id: String,
    pub family: ChainFamily,
    pub rpc_url: String,
    pub timeout: std::time::Duration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainStatus {
    pub chain_id: String,
    pub connected: bool,
    pub latest_block: Option<u64>,
    pub finalized_block: Option<u64>,
    pub safe_block: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct BalanceQuery {
    pub address: String,
    pub finality: Option<Finality>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub chain_id: String,
    pub balance: String,
    pub decimals: u32,
    pub symbol: String,
    pub at_block: u64,
}

#[derive(Clone, Debug)]
pub struct TokenBalanceQuery {
    pub address: String,
    pub token: String,
    pub finality: Option<Finality>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Incoming,
    Outgoing,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransfersQuery {
    pub address: String,
    pub direction: Option<TransferDirection>,
    pub token: Option<String>,
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub chain_id: String,
    pub tx_hash: String,
    pub block_number: u64,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub decimals: u32,
    pub symbol: String,
    pub token: Option<String>,
    pub timestamp: Timestamp,
    pub observed_at: Timestamp,
}
