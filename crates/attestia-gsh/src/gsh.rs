use std::collections::BTreeMap;

use attestia_core::sha256_canonical;
use attestia_ledger::LedgerSnapshot;
use attestia_registrar::RegistrarSnapshot;
use chrono::Utc;
use serde_json::json;

use crate::types::{ExportableStateBundle, GlobalStateHash, Subsystems};

/// Computes the deterministic Global State Hash over a ledger snapshot, a
/// registrar snapshot, and optional per-chain hashes (C8).
///
/// Changing any byte of either snapshot changes `hash`; `chainHashes` is
/// omitted from `subsystems.chains` entirely when absent or empty, so its
/// absence is distinguishable from an empty-but-present map at the hash
/// level too.
pub fn compute_global_state_hash(
    ledger_snapshot: &LedgerSnapshot,
    registrar_snapshot: &RegistrarSnapshot,
    chain_hashes: Option<BTreeMap<String, String>>,
) -> GlobalStateHash {
    let ledger_hash = sha256_canonical(ledger_snapshot);
    let registrum_hash = sha256_canonical(registrar_snapshot);
    let chains = chain_hashes.filter(|m| !m.is_empty());

    let hash = sha256_canonical(&json!({
        "ledger": ledger_hash,
        "registrum": registrum_hash,
        "chains": chains,
    }));

    GlobalStateHash {
        hash,
        subsystems: Subsystems {
            ledger: ledger_hash,
            registrum: registrum_hash,
            chains,
        },
        computed_at: Utc::now(),
    }
}

/// Builds an `ExportableStateBundle` directly from `compute_global_state_hash`,
/// covering the whole bundle except `exportedAt` with `bundleHash`.
pub fn create_state_bundle(
    ledger_snapshot: LedgerSnapshot,
    registrar_snapshot: RegistrarSnapshot,
    event_hashes: Vec<String>,
    chain_hashes: Option<BTreeMap<String, String>>,
) -> ExportableStateBundle {
    let global_state_hash =
        compute_global_state_hash(&ledger_snapshot, &registrar_snapshot, chain_hashes.clone());

    let mut bundle = ExportableStateBundle {
        version: 1,
        ledger_snapshot,
        registrum_snapshot: registrar_snapshot,
        event_hashes,
        chain_hashes: chain_hashes.filter(|m| !m.is_empty()),
        global_state_hash,
        bundle_hash: String::new(),
        exported_at: Utc::now(),
    };
    bundle.bundle_hash = recompute_bundle_hash(&bundle);
    bundle
}

/// Recomputes the deterministic `bundleHash` of a bundle from its own
/// fields, excluding `exportedAt` and the `globalStateHash`'s own
/// `computedAt` (both are metadata, never part of any hash). Used both to
/// populate `bundleHash` on creation and by the replay verifier (C10) to
/// check a received bundle for tampering.
pub fn recompute_bundle_hash(bundle: &ExportableStateBundle) -> String {
    sha256_canonical(&json!({
        "version": bundle.version,
        "ledgerSnapshot": bundle.ledger_snapshot,
        "registrumSnapshot": bundle.registrum_snapshot,
        "eventHashes": bundle.event_hashes,
        "chainHashes": bundle.chain_hashes,
        "globalStateHash": {
            "hash": bundle.global_state_hash.hash,
            "subsystems": bundle.global_state_hash.subsystems,
        },
    }))
}
