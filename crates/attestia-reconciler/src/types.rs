use attestia_core::{Money, Timestamp};
use attestia_ledger::LedgerEntry;
use attestia_observer::TransferEvent;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
    Pending,
    Executed,
    Failed,
    Cancelled,
}

/// A declared intent to move value, as recorded by the vault/treasury
/// subsystems upstream of reconciliation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    pub status: IntentStatus,
    pub chain_id: Option<String>,
    pub tx_hash: Option<String>,
    pub money: Option<Money>,
}

#[derive(Clone, Debug, Default)]
pub struct ReconcilerInput {
    pub intents: Vec<Intent>,
    pub ledger_entries: Vec<LedgerEntry>,
    pub chain_events: Vec<TransferEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscrepancyKind {
    AmountMismatch,
    MissingChainEvent,
    MissingLedgerEntry,
    OrphanChainEvent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub kind: DiscrepancyKind,
    pub correlation_id: Option<String>,
    pub chain_id: Option<String>,
    pub tx_hash: Option<String>,
    pub expected: Option<Money>,
    pub actual: Option<Money>,
    pub evidence: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchedRecord {
    pub intent_id: Option<String>,
    pub correlation_id: Option<String>,
    pub chain_id: Option<String>,
    pub tx_hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationTotals {
    pub matched_count: usize,
    pub mismatch_count: usize,
    pub missing_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    pub id: String,
    pub report_id: String,
    pub snapshot_hash: String,
    pub state_count: usize,
    pub attested_by: String,
    pub attested_at: Timestamp,
    pub signature: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub report_id: String,
    pub matched_count: usize,
    pub mismatch_count: usize,
    pub missing_count: usize,
    pub discrepancies: Vec<Discrepancy>,
    pub bundle_hash: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutput {
    pub report_id: String,
    pub matched: Vec<MatchedRecord>,
    pub mismatches: Vec<Discrepancy>,
    pub missing: Vec<Discrepancy>,
    pub totals: ReconciliationTotals,
    pub attestation: Attestation,
}
