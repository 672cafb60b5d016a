pub mod consensus;
pub mod types;
pub mod verifier;

pub use consensus::compute_consensus;
pub use types::{
    ConsensusResult, ReplayVerification, SubsystemCheck, Verdict, VerificationOptions,
    VerifierReport,
};
pub use verifier::{run_verification, verify_by_replay, VerifierNode};

#[cfg(test)]
mod tests {
    use super::*;
    use attestia_gsh::create_state_bundle;
    use attestia_ledger::LedgerSnapshot;
    use attestia_registrar::RegistrarSnapshot;
    use std::collections::BTreeMap;

    fn opts(verifier_id: &str, strict: bool) -> VerificationOptions {
        VerificationOptions {
            verifier_id: verifier_id.to_string(),
            label: None,
            strict_mode: strict,
        }
    }

    #[test]
    fn clean_bundle_passes_with_no_discrepancies() {
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        let report = run_verification(&bundle, &opts("v1", false));
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.discrepancies.is_empty());
    }

    #[test]
    fn tampered_bundle_hash_is_detected() {
        let mut bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        bundle.bundle_hash = "0".repeat(64);
        let report = run_verification(&bundle, &opts("v1", false));
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.discrepancies.contains(&"Bundle hash mismatch".to_string()));
    }

    #[test]
    fn tampered_ledger_snapshot_is_detected() {
        let mut bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        bundle.ledger_snapshot.transaction_count = 99;
        let report = run_verification(&bundle, &opts("v1", false));
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.discrepancies.iter().any(|d| d.contains("Ledger hash mismatch")));
        assert!(report.discrepancies.iter().any(|d| d.contains("Global hash mismatch")));
    }

    #[test]
    fn strict_mode_requires_chain_hashes() {
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        let report = run_verification(&bundle, &opts("v1", true));
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report
            .discrepancies
            .contains(&"Strict mode requires chain hashes".to_string()));
    }

    #[test]
    fn strict_mode_passes_with_chain_hashes_present() {
        let mut chains = BTreeMap::new();
        chains.insert("eth-mainnet".to_string(), "abc123".to_string());
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            Some(chains),
        );
        let report = run_verification(&bundle, &opts("v1", true));
        assert_eq!(report.verdict, Verdict::Pass);
    }

    #[test]
    fn report_ids_are_unique_across_runs() {
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        let r1 = run_verification(&bundle, &opts("v1", false));
        let r2 = run_verification(&bundle, &opts("v1", false));
        assert_ne!(r1.report_id, r2.report_id);
    }

    #[test]
    fn verify_by_replay_compares_against_expected_hash() {
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        let ok = verify_by_replay(&bundle, Some(&bundle.bundle_hash));
        assert_eq!(ok.matches_expected, Some(true));
        assert!(ok.discrepancies.is_empty());

        let bad = verify_by_replay(&bundle, Some("wrong-hash"));
        assert_eq!(bad.matches_expected, Some(false));
        assert!(!bad.discrepancies.is_empty());
    }

    #[test]
    fn verifier_node_accumulates_reports() {
        let bundle = create_state_bundle(
            LedgerSnapshot::default(),
            RegistrarSnapshot::default(),
            vec!["h1".into()],
            None,
        );
        let mut node = VerifierNode::new();
        node.verify(&bundle, &opts("v1", false));
        node.verify(&bundle, &opts("v2", false));
        assert_eq!(node.reports().len(), 2);
    }

    fn report_with(verifier_id: &str, verdict: Verdict) -> VerifierReport {
        VerifierReport {
            report_id: format!("r-{verifier_id}"),
            verifier_id: verifier_id.to_string(),
            verdict,
            bundle_hash: "shared-hash".to_string(),
            subsystem_checks: Vec::new(),
            discrepancies: Vec::new(),
            verified_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn consensus_passes_when_all_reports_pass() {
        let reports = vec![
            report_with("v1", Verdict::Pass),
            report_with("v2", Verdict::Pass),
            report_with("v3", Verdict::Pass),
        ];
        let result = compute_consensus(&reports, 3);
        assert_eq!(result.verdict, Verdict::Pass);
        assert!(result.quorum_reached);
        assert!(result.dissenters.is_empty());
        assert_eq!(result.agreement_ratio, 1.0);
    }

    #[test]
    fn consensus_fails_and_flags_dissenters_on_any_fail() {
        let reports = vec![
            report_with("v1", Verdict::Pass),
            report_with("v2", Verdict::Pass),
            report_with("v3", Verdict::Fail),
        ];
        let result = compute_consensus(&reports, 3);
        assert_eq!(result.verdict, Verdict::Fail);
        assert_eq!(result.dissenters, vec!["v3".to_string()]);
        assert!((result.agreement_ratio - (2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn consensus_quorum_not_reached_below_minimum() {
        let reports = vec![report_with("v1", Verdict::Pass)];
        let result = compute_consensus(&reports, 3);
        assert!(!result.quorum_reached);
    }
}
