//! Deserialisable description of one attestation cycle's inputs: the
//! domain commands to turn into events this cycle, plus the out-of-band
//! intents/chain observations the reconciler needs alongside the ledger
//! and registrar state those events produce.

use serde::Deserialize;
use serde_json::Value as Json;

use attestia_ledger::AccountType;
use attestia_observer::TransferEvent;
use attestia_reconciler::Intent;

#[derive(Clone, Debug, Deserialize)]
pub struct AccountInput {
    pub id: String,
    pub account_type: AccountType,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntryInput {
    pub id: String,
    pub account_id: String,
    pub entry_type: attestia_ledger::EntryType,
    pub amount: String,
    pub currency: String,
    pub decimals: u32,
    pub correlation_id: String,
    #[serde(default)]
    pub intent_id: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StateInput {
    pub id: String,
    pub structure: String,
    pub data: Json,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CycleInput {
    #[serde(default)]
    pub accounts: Vec<AccountInput>,
    #[serde(default)]
    pub entries: Vec<EntryInput>,
    #[serde(default)]
    pub states: Vec<StateInput>,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub chain_events: Vec<TransferEvent>,
}

impl CycleInput {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading cycle input {}: {e}", path.display()))?;
        serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("parsing cycle input {}: {e}", path.display()))
    }
}
