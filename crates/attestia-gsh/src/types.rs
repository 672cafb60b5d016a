use std::collections::BTreeMap;

use attestia_core::Timestamp;
use attestia_ledger::LedgerSnapshot;
use attestia_registrar::RegistrarSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subsystems {
    pub ledger: String,
    pub registrum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chains: Option<BTreeMap<String, String>>,
}

/// Deterministic function of (ledger snapshot, registrar snapshot,
/// optional chain hashes) alone; `computed_at` is metadata, not part of
/// the hash (C8).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalStateHash {
    pub hash: String,
    pub subsystems: Subsystems,
    pub computed_at: Timestamp,
}

/// The exportable bundle a verifier independently replays against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportableStateBundle {
    pub version: u32,
    pub ledger_snapshot: LedgerSnapshot,
    pub registrum_snapshot: RegistrarSnapshot,
    pub event_hashes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_hashes: Option<BTreeMap<String, String>>,
    pub global_state_hash: GlobalStateHash,
    pub bundle_hash: String,
    pub exported_at: Timestamp,
}
