use attestia_core::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

pub const MEMO_TYPE: &str = "attestia/witness/v1";
pub const MEMO_FORMAT: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WitnessMemo {
    pub memo_type: String,
    pub memo_format: String,
    pub memo_data: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WitnessRecord {
    pub id: String,
    pub payload: Json,
    pub chain_id: String,
    pub tx_hash: String,
    pub ledger_index: u64,
    pub witnessed_at: Timestamp,
    pub witness_account: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_ratio: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 200,
            max_delay_ms: 5_000,
            jitter_ratio: 0.2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("witness submission failed after {attempts} attempt(s): {cause}")]
pub struct WitnessSubmitError {
    pub attempts: u32,
    pub cause: attestia_core::AttestiaError,
    pub payload: Json,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WitnessVerification {
    pub verified: bool,
    pub discrepancies: Vec<String>,
}
