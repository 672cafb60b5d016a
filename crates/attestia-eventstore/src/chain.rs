use attestia_core::{canonical_json, DomainEvent, StoredEvent, Timestamp, GENESIS_HASH};
use attestia_crypto::hash::chain_hash;
use serde_json::json;

use crate::types::{ChainError, VerifyResult};

/// Builds the JSON value hashed for a single event: `{event, streamId,
/// version, globalPosition, appendedAt}`.
fn hashing_payload(
    event: &DomainEvent,
    stream_id: &str,
    version: u64,
    global_position: u64,
    appended_at: &Timestamp,
) -> serde_json::Value {
    json!({
        "event": serde_json::to_value(event).expect("DomainEvent serializes"),
        "streamId": stream_id,
        "version": version,
        "globalPosition": global_position,
        "appendedAt": appended_at.to_rfc3339(),
    })
}

/// Computes the hash for the next event to be appended, given its
/// previous-hash link (or [`GENESIS_HASH`] if none).
pub fn compute_hash(
    event: &DomainEvent,
    stream_id: &str,
    version: u64,
    global_position: u64,
    appended_at: &Timestamp,
    previous_hash: &str,
) -> String {
    let payload = hashing_payload(event, stream_id, version, global_position, appended_at);
    let canonical = canonical_json(&payload);
    chain_hash(canonical.as_bytes(), previous_hash)
}

/// Recomputes and checks the hash field of a single already-stored event
/// against its declared `previousHash`.
fn recompute(stored: &StoredEvent) -> String {
    compute_hash(
        &stored.event,
        &stored.stream_id,
        stored.version,
        stored.global_position,
        &stored.appended_at,
        &stored.previous_hash,
    )
}

/// Walks a sequence of stored events checking that each links to the
/// previous one's hash (or [`GENESIS_HASH`] for the first) and that its own
/// `hash` field is the correct recomputation.
///
/// Legacy events with empty hash fields are tolerated: they are skipped and
/// the chain resumes at the first event carrying hash fields.
pub fn verify_hash_chain(events: &[StoredEvent]) -> VerifyResult {
    let mut errors = Vec::new();
    let mut last_hash: Option<&str> = None;
    let mut last_verified_position = 0u64;

    for event in events {
        if event.hash.is_empty() {
            // Legacy event without hash fields: skip, chain resumes after it.
            continue;
        }

        let expected_previous = last_hash.unwrap_or(GENESIS_HASH);
        if event.previous_hash != expected_previous {
            errors.push(ChainError {
                position: event.global_position,
                reason: format!(
                    "previousHash mismatch: expected {expected_previous}, got {}",
                    event.previous_hash
                ),
            });
        } else {
            let expected_hash = recompute(event);
            if expected_hash != event.hash {
                errors.push(ChainError {
                    position: event.global_position,
                    reason: "hash does not match recomputed value".to_string(),
                });
            } else {
                last_verified_position = event.global_position;
            }
        }
        last_hash = Some(&event.hash);
    }

    VerifyResult {
        valid: errors.is_empty(),
        last_verified_position,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attestia_core::{EventMetadata, EventSource};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn event(correlation: &str) -> DomainEvent {
        DomainEvent::new(
            "vault.deposited",
            EventMetadata {
                event_id: format!("evt-{correlation}"),
                timestamp: Utc::now(),
                actor: "tester".into(),
                correlation_id: correlation.into(),
                source: EventSource::Vault,
            },
            BTreeMap::new(),
        )
    }

    fn stored(prev: &str, version: u64, position: u64, correlation: &str) -> StoredEvent {
        let e = event(correlation);
        let appended_at = Utc::now();
        let hash = compute_hash(&e, "s1", version, position, &appended_at, prev);
        StoredEvent {
            stream_id: "s1".into(),
            version,
            global_position: position,
            appended_at,
            previous_hash: prev.to_string(),
            hash,
            event: e,
        }
    }

    #[test]
    fn valid_chain_verifies() {
        let e0 = stored(GENESIS_HASH, 1, 1, "a");
        let e1 = stored(&e0.hash, 2, 2, "b");
        let e2 = stored(&e1.hash, 3, 3, "c");
        let result = verify_hash_chain(&[e0, e1, e2]);
        assert!(result.valid);
        assert_eq!(result.last_verified_position, 3);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn tampered_previous_hash_is_detected() {
        let e0 = stored(GENESIS_HASH, 1, 1, "a");
        let mut e1 = stored(&e0.hash, 2, 2, "b");
        e1.previous_hash = "bogus".to_string();
        let e2 = stored(&e1.hash, 3, 3, "c");
        let result = verify_hash_chain(&[e0, e1, e2]);
        assert!(!result.valid);
        assert_eq!(result.errors[0].position, 2);
    }
}
