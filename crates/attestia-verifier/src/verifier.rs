use std::sync::atomic::{AtomicU64, Ordering};

use attestia_core::{sha256_canonical, sha256_hex};
use attestia_gsh::{compute_global_state_hash, recompute_bundle_hash, ExportableStateBundle};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::types::{ReplayVerification, SubsystemCheck, Verdict, VerificationOptions, VerifierReport};

static REPORT_NONCE: AtomicU64 = AtomicU64::new(0);

/// Independently replays everything in `bundle` and compares against the
/// values it declares, accumulating every mismatch rather than
/// short-circuiting on the first one (C10).
pub fn run_verification(bundle: &ExportableStateBundle, opts: &VerificationOptions) -> VerifierReport {
    let mut discrepancies = Vec::new();
    let mut subsystem_checks = Vec::new();

    // 1. Bundle hash.
    let recomputed_bundle_hash = recompute_bundle_hash(bundle);
    if recomputed_bundle_hash != bundle.bundle_hash {
        discrepancies.push("Bundle hash mismatch".to_string());
    }

    // 2 & 3. Subsystem hashes, then the global hash built from them.
    let recomputed_gsh = compute_global_state_hash(
        &bundle.ledger_snapshot,
        &bundle.registrum_snapshot,
        bundle.chain_hashes.clone(),
    );

    subsystem_checks.push(make_check(
        "ledger",
        &bundle.global_state_hash.subsystems.ledger,
        &recomputed_gsh.subsystems.ledger,
    ));
    if recomputed_gsh.subsystems.ledger != bundle.global_state_hash.subsystems.ledger {
        discrepancies.push("Ledger hash mismatch".to_string());
    }

    subsystem_checks.push(make_check(
        "registrum",
        &bundle.global_state_hash.subsystems.registrum,
        &recomputed_gsh.subsystems.registrum,
    ));
    if recomputed_gsh.subsystems.registrum != bundle.global_state_hash.subsystems.registrum {
        discrepancies.push("Registrum hash mismatch".to_string());
    }

    if recomputed_gsh.hash != bundle.global_state_hash.hash {
        discrepancies.push("Global hash mismatch".to_string());
    }

    // 4. Per-chain hashes are recorded, not independently recomputable here
    // (the chain observers that produced them are out of scope for replay).
    if let Some(chains) = &bundle.chain_hashes {
        for (chain_id, hash) in chains {
            subsystem_checks.push(make_check(&format!("chain:{chain_id}"), hash, hash));
        }
    }

    // 5. Strict mode requires declared chain hashes.
    if opts.strict_mode && bundle.chain_hashes.as_ref().map(|m| m.is_empty()).unwrap_or(true) {
        discrepancies.push("Strict mode requires chain hashes".to_string());
    }

    let verdict = if discrepancies.is_empty() { Verdict::Pass } else { Verdict::Fail };

    let report_without_id = json!({
        "verifierId": opts.verifier_id,
        "label": opts.label,
        "verdict": verdict,
        "bundleHash": bundle.bundle_hash,
        "subsystemChecks": subsystem_checks,
        "discrepancies": discrepancies,
        "verifiedAt": Utc::now(),
    });
    let nonce = REPORT_NONCE.fetch_add(1, Ordering::Relaxed);
    let report_id = sha256_hex(format!("{}{}", sha256_canonical(&report_without_id), nonce).as_bytes());

    if verdict == Verdict::Fail {
        warn!(verifier_id = %opts.verifier_id, discrepancies = discrepancies.len(), "verification failed");
    } else {
        info!(verifier_id = %opts.verifier_id, "verification passed");
    }

    VerifierReport {
        report_id,
        verifier_id: opts.verifier_id.clone(),
        verdict,
        bundle_hash: bundle.bundle_hash.clone(),
        subsystem_checks,
        discrepancies,
        verified_at: Utc::now(),
    }
}

fn make_check(subsystem: &str, expected: &str, actual: &str) -> SubsystemCheck {
    SubsystemCheck {
        subsystem: subsystem.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        matches: expected == actual,
    }
}

/// Owns a running list of reports, one per `run_verification` call.
#[derive(Default)]
pub struct VerifierNode {
    reports: Vec<VerifierReport>,
}

impl VerifierNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify(&mut self, bundle: &ExportableStateBundle, opts: &VerificationOptions) -> VerifierReport {
        let report = run_verification(bundle, opts);
        self.reports.push(report.clone());
        report
    }

    pub fn reports(&self) -> &[VerifierReport] {
        &self.reports
    }
}

/// Convenience roundtrip: recomputes the bundle hash and, when
/// `expected_hash` is given, compares against it.
pub fn verify_by_replay(bundle: &ExportableStateBundle, expected_hash: Option<&str>) -> ReplayVerification {
    let hash = recompute_bundle_hash(bundle);
    let mut discrepancies = Vec::new();
    let matches_expected = expected_hash.map(|expected| {
        let matches = expected == hash;
        if !matches {
            discrepancies.push("Bundle hash mismatch".to_string());
        }
        matches
    });
    ReplayVerification { hash, matches_expected, discrepancies }
}
