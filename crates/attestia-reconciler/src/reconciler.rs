use attestia_core::{sha256_canonical, Money};
use attestia_observer::TransferEvent;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::types::{
    Attestation, Discrepancy, DiscrepancyKind, IntentStatus, MatchedRecord, ReconciliationOutput,
    ReconciliationReport, ReconciliationTotals, ReconcilerInput,
};

impl ReconciliationOutput {
    /// Projects the full match/mismatch/missing output onto the
    /// data-model-level `ReconciliationReport` record (§3).
    pub fn report(&self) -> ReconciliationReport {
        let discrepancies: Vec<Discrepancy> = self
            .mismatches
            .iter()
            .chain(self.missing.iter())
            .cloned()
            .collect();
        ReconciliationReport {
            report_id: self.report_id.clone(),
            matched_count: self.totals.matched_count,
            mismatch_count: self.totals.mismatch_count,
            missing_count: self.totals.missing_count,
            discrepancies,
            bundle_hash: self.attestation.snapshot_hash.clone(),
        }
    }
}

/// Three-way matches intents ↔ ledger entries ↔ chain events and emits a
/// signed-pending attestation (C7).
///
/// Matching keys:
///  - intents ↔ chain events: `(chainId, txHash)` on executed intents
///  - intents ↔ ledger entries: via `intentId`
///  - ledger entries ↔ chain events: `(chainId, txHash, amount)` triple
pub fn reconcile(input: &ReconcilerInput, attested_by: &str) -> ReconciliationOutput {
    let mut matched = Vec::new();
    let mut mismatches = Vec::new();
    let mut missing = Vec::new();

    let mut referenced_chain_events: std::collections::HashSet<(String, String)> =
        std::collections::HashSet::new();

    for intent in &input.intents {
        if intent.status != IntentStatus::Executed {
            continue;
        }
        let (Some(chain_id), Some(tx_hash)) = (&intent.chain_id, &intent.tx_hash) else {
            continue;
        };

        let chain_event = input
            .chain_events
            .iter()
            .find(|e| &e.chain_id == chain_id && &e.tx_hash == tx_hash);
        let ledger_entry = input
            .ledger_entries
            .iter()
            .find(|e| e.intent_id.as_deref() == Some(intent.id.as_str()));

        if let Some(event) = chain_event {
            referenced_chain_events.insert((chain_id.clone(), tx_hash.clone()));
        }

        match (chain_event, ledger_entry) {
            (None, _) => {
                missing.push(Discrepancy {
                    kind: DiscrepancyKind::MissingChainEvent,
                    correlation_id: ledger_entry.map(|e| e.correlation_id.clone()),
                    chain_id: Some(chain_id.clone()),
                    tx_hash: Some(tx_hash.clone()),
                    expected: intent.money.clone(),
                    actual: None,
                    evidence: format!(
                        "intent {} executed with txHash {tx_hash} on {chain_id} but no matching chain event was observed",
                        intent.id
                    ),
                });
            }
            (Some(_), None) => {
                missing.push(Discrepancy {
                    kind: DiscrepancyKind::MissingLedgerEntry,
                    correlation_id: None,
                    chain_id: Some(chain_id.clone()),
                    tx_hash: Some(tx_hash.clone()),
                    expected: intent.money.clone(),
                    actual: None,
                    evidence: format!(
                        "intent {} has a matching chain event but no ledger entry references intentId {}",
                        intent.id, intent.id
                    ),
                });
            }
            (Some(event), Some(entry)) => {
                let amounts_match = money_equal(&entry.money, event);
                if amounts_match {
                    matched.push(MatchedRecord {
                        intent_id: Some(intent.id.clone()),
                        correlation_id: Some(entry.correlation_id.clone()),
                        chain_id: Some(chain_id.clone()),
                        tx_hash: Some(tx_hash.clone()),
                    });
                } else {
                    mismatches.push(Discrepancy {
                        kind: DiscrepancyKind::AmountMismatch,
                        correlation_id: Some(entry.correlation_id.clone()),
                        chain_id: Some(chain_id.clone()),
                        tx_hash: Some(tx_hash.clone()),
                        expected: Some(entry.money.clone()),
                        actual: Money::from_str(&event.amount, &event.symbol, event.decimals).ok(),
                        evidence: format!(
                            "ledger entry {} records {} but chain event for {tx_hash} reports {} {}",
                            entry.id, entry.money.amount, event.amount, event.symbol
                        ),
                    });
                }
            }
        }
    }

    // Orphan chain events: not referenced by any executed intent above,
    // and not the amount-matching counterpart of any ledger entry either.
    for event in &input.chain_events {
        let key = (event.chain_id.clone(), event.tx_hash.clone());
        if referenced_chain_events.contains(&key) {
            continue;
        }
        let ledger_match = input
            .ledger_entries
            .iter()
            .any(|e| e.tx_hash.as_deref() == Some(event.tx_hash.as_str()) && money_equal(&e.money, event));
        if ledger_match {
            continue;
        }
        mismatches.push(Discrepancy {
            kind: DiscrepancyKind::OrphanChainEvent,
            correlation_id: None,
            chain_id: Some(event.chain_id.clone()),
            tx_hash: Some(event.tx_hash.clone()),
            expected: None,
            actual: Money::from_str(&event.amount, &event.symbol, event.decimals).ok(),
            evidence: format!(
                "chain event {} on {} has no corresponding intent or ledger entry",
                event.tx_hash, event.chain_id
            ),
        });
    }

    // Deterministic canonical ordering before hashing, per spec.
    let mut discrepancies: Vec<Discrepancy> = mismatches.iter().chain(missing.iter()).cloned().collect();
    discrepancies.sort_by(|a, b| {
        sort_key(a.chain_id.as_deref(), a.tx_hash.as_deref(), a.correlation_id.as_deref())
            .cmp(&sort_key(b.chain_id.as_deref(), b.tx_hash.as_deref(), b.correlation_id.as_deref()))
    });
    matched.sort_by(|a, b| {
        sort_key(a.chain_id.as_deref(), a.tx_hash.as_deref(), a.correlation_id.as_deref())
            .cmp(&sort_key(b.chain_id.as_deref(), b.tx_hash.as_deref(), b.correlation_id.as_deref()))
    });

    let bundle_hash = sha256_canonical(&json!({
        "matched": matched,
        "discrepancies": discrepancies,
    }));

    let totals = ReconciliationTotals {
        matched_count: matched.len(),
        mismatch_count: mismatches.len(),
        missing_count: missing.len(),
    };

    let report_id = sha256_canonical(&json!({
        "bundleHash": bundle_hash,
        "totals": totals,
        "nonce": uuid_like_nonce(&bundle_hash, matched.len()),
    }));

    let attested_at = Utc::now();
    let state_count = matched.len() + mismatches.len() + missing.len();
    let attestation_id = sha256_canonical(&json!({
        "reportId": report_id,
        "snapshotHash": bundle_hash,
        "stateCount": state_count,
    }));

    info!(
        report_id = %report_id,
        matched = totals.matched_count,
        mismatches = totals.mismatch_count,
        missing = totals.missing_count,
        "reconciliation completed"
    );

    ReconciliationOutput {
        report_id: report_id.clone(),
        matched,
        mismatches,
        missing,
        totals,
        attestation: Attestation {
            id: attestation_id,
            report_id,
            snapshot_hash: bundle_hash,
            state_count,
            attested_by: attested_by.to_string(),
            attested_at,
            signature: None,
        },
    }
}

/// Compares a ledger entry's money against a chain event's reported
/// amount, as a scaled integer under the entry's `decimals` (§4.7: amount
/// compared as scaled integer under the entry's decimals).
fn money_equal(ledger_money: &Money, event: &TransferEvent) -> bool {
    if ledger_money.decimals != event.decimals {
        return false;
    }
    let ledger_scaled = match ledger_money.scaled() {
        Ok(v) => v,
        Err(_) => return false,
    };
    let event_scaled = match Money::from_str(&event.amount, &event.symbol, event.decimals).and_then(|m| m.scaled())
    {
        Ok(v) => v,
        Err(_) => return false,
    };
    ledger_scaled == event_scaled
}

fn sort_key(chain_id: Option<&str>, tx_hash: Option<&str>, correlation_id: Option<&str>) -> (String, String, String) {
    (
        chain_id.unwrap_or_default().to_string(),
        tx_hash.unwrap_or_default().to_string(),
        correlation_id.unwrap_or_default().to_string(),
    )
}

/// Deterministic-but-unique nonce derived from the bundle contents and
/// matched-set size, so repeated runs over identical inputs still produce
/// distinct `reportId`s without relying on wall-clock time or randomness.
fn uuid_like_nonce(bundle_hash: &str, salt: usize) -> String {
    format!("{bundle_hash}:{salt}:{}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}
