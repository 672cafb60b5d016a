use std::collections::HashSet;

use attestia_core::{sha256_canonical, AttestiaError, Timestamp};
use chrono::Utc;
use serde_json::json;

use crate::store::GovernanceStore;
use crate::types::{
    AggregatedSignature, AuthorityValidation, GovernanceEvent, GovernancePolicy, Quorum,
    SignatureEntry, StateRef,
};

/// `sha256(canonical({attestationHash, attestationTimestamp, policyId,
/// policyVersion, quorum, signers: addresses sorted}))`. Identical for the
/// same attestation and policy regardless of call order; any change in
/// either input changes the hash.
pub fn build_canonical_signing_payload(
    attestation_hash: &str,
    attestation_timestamp: Timestamp,
    policy: &GovernancePolicy,
) -> String {
    let mut addresses: Vec<&str> = policy.signers.iter().map(|s| s.address.as_str()).collect();
    addresses.sort();
    sha256_canonical(&json!({
        "attestationHash": attestation_hash,
        "attestationTimestamp": attestation_timestamp,
        "policyId": policy.id,
        "policyVersion": policy.version,
        "quorum": policy.quorum,
        "signers": addresses,
    }))
}

/// Aggregates per-signer signatures against `policy`, rejecting duplicate
/// addresses and non-members before checking quorum. Signatures are
/// returned ordered ascending by address regardless of input order.
pub fn aggregate_signatures(
    mut sigs: Vec<SignatureEntry>,
    policy: &GovernancePolicy,
    payload_hash: &str,
) -> Result<AggregatedSignature, AttestiaError> {
    let mut seen = HashSet::with_capacity(sigs.len());
    for s in &sigs {
        if !seen.insert(s.address.clone()) {
            return Err(AttestiaError::InvalidInput(format!(
                "duplicate signer in signature set: {}",
                s.address
            )));
        }
    }

    let mut total_weight = 0u32;
    for s in &sigs {
        let signer = policy
            .signers
            .iter()
            .find(|p| p.address == s.address)
            .ok_or_else(|| {
                AttestiaError::InvalidInput(format!("signer not in policy: {}", s.address))
            })?;
        total_weight += signer.weight;
    }

    if total_weight < policy.quorum {
        return Err(AttestiaError::QuorumNotMet(format!(
            "total weight {total_weight} below quorum {}",
            policy.quorum
        )));
    }

    sigs.sort_by(|a, b| a.address.cmp(&b.address));

    let signer_addresses: Vec<String> = sigs.iter().map(|s| s.address.clone()).collect();
    let missing_addresses: Vec<String> = policy
        .signers
        .iter()
        .map(|s| s.address.clone())
        .filter(|a| !signer_addresses.contains(a))
        .collect();

    Ok(AggregatedSignature {
        payload_hash: payload_hash.to_string(),
        policy_id: policy.id.clone(),
        signatures: sigs,
        quorum: Quorum {
            met: total_weight >= policy.quorum,
            total_weight,
            required_weight: policy.quorum,
            signer_addresses,
            missing_addresses,
        },
        aggregated_at: Utc::now(),
    })
}

/// Rejects a state reference whose declared policy id or version does not
/// match the currently held policy.
pub fn validate_authority(current_policy: &GovernancePolicy, state_ref: &StateRef) -> AuthorityValidation {
    let mut rejections = Vec::new();
    if state_ref.policy_id != current_policy.id {
        rejections.push(format!(
            "policy id mismatch: expected {}, got {}",
            current_policy.id, state_ref.policy_id
        ));
    }
    if state_ref.policy_version != current_policy.version {
        rejections.push(format!(
            "policy version mismatch: expected {}, got {}",
            current_policy.version, state_ref.policy_version
        ));
    }
    AuthorityValidation { valid: rejections.is_empty(), rejections }
}

/// Verifies `sigs` against the policy as of `at_version`, rather than the
/// current policy, by replaying `events` up to that version first.
pub fn validate_historical_quorum(
    payload_hash: &str,
    sigs: Vec<SignatureEntry>,
    events: &[GovernanceEvent],
    at_version: u32,
) -> Result<AggregatedSignature, AttestiaError> {
    let historical = GovernanceStore::replay_to_version(events, at_version);
    let policy = historical.get_current_policy();
    aggregate_signatures(sigs, &policy, payload_hash)
}
