pub mod signing;
pub mod store;
pub mod types;

pub use signing::{
    aggregate_signatures, build_canonical_signing_payload, validate_authority,
    validate_historical_quorum,
};
pub use store::GovernanceStore;
pub use types::{
    AggregatedSignature, AuthorityValidation, GovernanceEvent, GovernanceEventKind,
    GovernancePolicy, SignatureEntry, Signer, StateRef,
};

#[cfg(test)]
mod tests {
    use super::*;
    use attestia_core::AttestiaError;
    use chrono::Utc;

    fn two_signer_store() -> GovernanceStore {
        let mut store = GovernanceStore::new();
        store.add_signer("addr-b", "Bob", 1, "root").unwrap();
        store.add_signer("addr-a", "Alice", 1, "root").unwrap();
        store.change_quorum(2, "root").unwrap();
        store
    }

    #[test]
    fn adding_duplicate_signer_is_rejected() {
        let mut store = GovernanceStore::new();
        store.add_signer("addr-a", "Alice", 1, "root").unwrap();
        assert!(store.add_signer("addr-a", "Alice2", 1, "root").is_err());
    }

    #[test]
    fn zero_weight_signer_is_rejected() {
        let mut store = GovernanceStore::new();
        assert!(store.add_signer("addr-a", "Alice", 0, "root").is_err());
    }

    #[test]
    fn removing_signer_below_quorum_is_rejected() {
        let mut store = two_signer_store();
        assert!(store.remove_signer("addr-a", "root").is_err());
    }

    #[test]
    fn quorum_cannot_exceed_total_weight() {
        let mut store = two_signer_store();
        assert!(store.change_quorum(10, "root").is_err());
    }

    #[test]
    fn policy_id_changes_on_every_transition() {
        let mut store = GovernanceStore::new();
        let p0 = store.get_current_policy();
        store.add_signer("addr-a", "Alice", 1, "root").unwrap();
        let p1 = store.get_current_policy();
        assert_ne!(p0.id, p1.id);
        assert_eq!(p1.version, 1);
    }

    #[test]
    fn replay_from_empty_resets_to_empty_policy() {
        let store = GovernanceStore::replay_from(vec![]);
        let policy = store.get_current_policy();
        assert_eq!(policy.version, 0);
        assert!(policy.signers.is_empty());
    }

    #[test]
    fn equal_event_sequences_produce_equal_final_state() {
        let store = two_signer_store();
        let events = store.events().to_vec();
        let replayed_a = GovernanceStore::replay_from(events.clone());
        let replayed_b = GovernanceStore::replay_from(events);
        let (pa, pb) = (replayed_a.get_current_policy(), replayed_b.get_current_policy());
        assert_eq!(pa.id, pb.id);
        assert_eq!(pa.signers, pb.signers);
        assert_eq!(pa.quorum, pb.quorum);
    }

    #[test]
    fn signing_payload_is_stable_for_same_inputs() {
        let policy = two_signer_store().get_current_policy();
        let ts = Utc::now();
        let a = build_canonical_signing_payload("hash1", ts, &policy);
        let b = build_canonical_signing_payload("hash1", ts, &policy);
        assert_eq!(a, b);
    }

    #[test]
    fn signing_payload_changes_with_attestation_hash() {
        let policy = two_signer_store().get_current_policy();
        let ts = Utc::now();
        let a = build_canonical_signing_payload("hash1", ts, &policy);
        let b = build_canonical_signing_payload("hash2", ts, &policy);
        assert_ne!(a, b);
    }

    #[test]
    fn aggregate_signatures_meets_quorum_and_sorts_by_address() {
        let policy = two_signer_store().get_current_policy();
        let sigs = vec![
            SignatureEntry { address: "addr-b".into(), signature: "sig-b".into() },
            SignatureEntry { address: "addr-a".into(), signature: "sig-a".into() },
        ];
        let agg = aggregate_signatures(sigs, &policy, "payload-hash").unwrap();
        assert!(agg.quorum.met);
        assert_eq!(agg.quorum.total_weight, 2);
        assert_eq!(agg.quorum.required_weight, policy.quorum);
        assert_eq!(agg.quorum.signer_addresses, vec!["addr-a".to_string(), "addr-b".to_string()]);
        assert!(agg.quorum.missing_addresses.is_empty());
        assert_eq!(agg.signatures[0].address, "addr-a");
        assert_eq!(agg.signatures[1].address, "addr-b");
    }

    #[test]
    fn aggregate_signatures_rejects_duplicate_address() {
        let policy = two_signer_store().get_current_policy();
        let sigs = vec![
            SignatureEntry { address: "addr-a".into(), signature: "sig-1".into() },
            SignatureEntry { address: "addr-a".into(), signature: "sig-2".into() },
        ];
        assert!(aggregate_signatures(sigs, &policy, "payload-hash").is_err());
    }

    #[test]
    fn aggregate_signatures_rejects_non_member() {
        let policy = two_signer_store().get_current_policy();
        let sigs = vec![SignatureEntry { address: "addr-z".into(), signature: "sig".into() }];
        assert!(aggregate_signatures(sigs, &policy, "payload-hash").is_err());
    }

    #[test]
    fn aggregate_signatures_fails_under_quorum() {
        let policy = two_signer_store().get_current_policy();
        let sigs = vec![SignatureEntry { address: "addr-a".into(), signature: "sig".into() }];
        assert!(matches!(
            aggregate_signatures(sigs, &policy, "payload-hash"),
            Err(AttestiaError::QuorumNotMet(_))
        ));
    }

    #[test]
    fn validate_authority_rejects_stale_policy_reference() {
        let store = two_signer_store();
        let current = store.get_current_policy();
        let stale = StateRef { policy_id: "stale-id".into(), policy_version: 0 };
        let result = validate_authority(&current, &stale);
        assert!(!result.valid);
        assert_eq!(result.rejections.len(), 2);
    }

    #[test]
    fn validate_historical_quorum_uses_policy_as_of_past_version() {
        let store = two_signer_store();
        let events = store.events().to_vec();
        // At version 1, only addr-b exists with quorum 0 (unset), so quorum
        // of 1 is trivially met.
        let sigs = vec![SignatureEntry { address: "addr-b".into(), signature: "sig".into() }];
        let result = validate_historical_quorum("payload-hash", sigs, &events, 1);
        assert!(result.is_ok());
    }
}
