use attestia_core::{sha256_canonical, AttestiaError};
use attestia_governance::{AggregatedSignature, GovernancePolicy};
use chrono::Utc;
use serde_json::Value as Json;
use tracing::info;

use crate::client::MockWitnessClient;
use crate::memo::{decode_memo, encode_memo};
use crate::retry::retry_with_backoff;
use crate::types::{RetryPolicy, WitnessRecord, WitnessSubmitError, WitnessVerification};

/// Single-sig flow: autofill → sign → submit → await validation → record.
/// The single wallet signs implicitly (the mock chain has no separate
/// signature check); retries only transient submit failures.
pub async fn submit_single_sig(
    client: &MockWitnessClient,
    witness_account: &str,
    payload: &Json,
    retry_policy: &RetryPolicy,
) -> Result<WitnessRecord, WitnessSubmitError> {
    let memo = encode_memo(payload);
    let (tx_hash, ledger_index) = retry_with_backoff(retry_policy, payload, |_attempt| {
        client.submit(&memo)
    })
    .await?;

    info!(chain_id = client.chain_id(), tx_hash, "witness single-sig submission committed");
    Ok(WitnessRecord {
        id: sha256_canonical(&serde_json::json!({"chainId": client.chain_id(), "txHash": tx_hash})),
        payload: payload.clone(),
        chain_id: client.chain_id().to_string(),
        tx_hash,
        ledger_index,
        witnessed_at: Utc::now(),
        witness_account: witness_account.to_string(),
    })
}

/// Multi-sig flow: verifies the aggregated signature meets `policy`'s
/// quorum *before* submitting — a sub-quorum blob is never sent to the
/// chain, so submission failure is the only retried failure mode.
pub async fn submit_multi_sig(
    client: &MockWitnessClient,
    witness_account: &str,
    payload: &Json,
    aggregated: &AggregatedSignature,
    policy: &GovernancePolicy,
    retry_policy: &RetryPolicy,
) -> Result<WitnessRecord, WitnessSubmitError> {
    if !aggregated.quorum.met {
        return Err(WitnessSubmitError {
            attempts: 0,
            cause: AttestiaError::QuorumNotMet(format!(
                "aggregated weight {} below quorum {}",
                aggregated.quorum.total_weight, aggregated.quorum.required_weight
            )),
            payload: payload.clone(),
        });
    }
    if aggregated.policy_id != policy.id {
        return Err(WitnessSubmitError {
            attempts: 0,
            cause: AttestiaError::InvalidInput(format!(
                "aggregated signature policy id {} does not match submitting policy {}",
                aggregated.policy_id, policy.id
            )),
            payload: payload.clone(),
        });
    }

    submit_single_sig(client, witness_account, payload, retry_policy).await
}

/// Fetches a transaction by hash, extracts and decodes its Attestia memo
/// (failing if absent or of the wrong type), re-hashes the decoded payload
/// content, and compares it against `record`. Any mismatch yields
/// `verified: false` with the reasons listed, never an error.
pub fn verify_witness(client: &MockWitnessClient, record: &WitnessRecord) -> WitnessVerification {
    let mut discrepancies = Vec::new();

    let Some(memo) = client.fetch_memo(&record.tx_hash) else {
        discrepancies.push("no memo found for transaction".to_string());
        return WitnessVerification { verified: false, discrepancies };
    };

    let decoded = match decode_memo(&memo) {
        Ok(json) => json,
        Err(e) => {
            discrepancies.push(format!("memo decode failed: {e}"));
            return WitnessVerification { verified: false, discrepancies };
        }
    };

    if decoded != record.payload {
        discrepancies.push("decoded memo payload does not match witness record".to_string());
    }

    if let Some(declared_hash) = decoded.get("hash").and_then(Json::as_str) {
        let mut content = decoded.clone();
        if let Some(obj) = content.as_object_mut() {
            obj.remove("hash");
        }
        let recomputed = sha256_canonical(&content);
        if recomputed != declared_hash {
            discrepancies.push("payload content hash mismatch".to_string());
        }
    }

    WitnessVerification { verified: discrepancies.is_empty(), discrepancies }
}
