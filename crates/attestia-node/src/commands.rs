//! Turns one cycle's domain commands into the `DomainEvent`s appended to
//! the event store (§2 data flow: "domain command -> events appended to
//! C2"). Ledger and registrar commands land on their own streams so each
//! can be replayed independently by the projector.

use std::collections::BTreeMap;

use attestia_core::{EventMetadata, EventSource};
use chrono::Utc;
use serde_json::{json, Value as Json};

use crate::cycle::CycleInput;
use crate::schema::{LEDGER_ACCOUNT_REGISTERED, LEDGER_ENTRIES_POSTED, REGISTRAR_STATE_REGISTERED};

pub const LEDGER_STREAM: &str = "ledger";
pub const REGISTRAR_STREAM: &str = "registrar";

fn metadata(event_id: String, actor: &str, correlation_id: &str, source: EventSource) -> EventMetadata {
    EventMetadata {
        event_id,
        timestamp: Utc::now(),
        actor: actor.to_string(),
        correlation_id: correlation_id.to_string(),
        source,
    }
}

fn json_object(value: Json) -> BTreeMap<String, Json> {
    match value {
        Json::Object(map) => map.into_iter().collect(),
        other => {
            let mut m = BTreeMap::new();
            m.insert("_value".to_string(), other);
            m
        }
    }
}

/// Builds the `ledger.*` events for this cycle's new accounts and entry
/// batches, grouped by `correlationId` so each batch lands as one event
/// (matching the ledger's own one-transaction-per-correlation-id rule).
pub fn ledger_events(input: &CycleInput) -> Vec<attestia_core::DomainEvent> {
    let mut events = Vec::new();

    for account in &input.accounts {
        let payload = json_object(json!({
            "account": {
                "id": account.id,
                "account_type": account.account_type,
                "name": account.name,
                "created_at": Utc::now(),
            }
        }));
        let meta = metadata(
            format!("{LEDGER_ACCOUNT_REGISTERED}:{}", account.id),
            "attestia-node",
            &format!("account-{}", account.id),
            EventSource::Vault,
        );
        events.push(attestia_schema::create_versioned_event(
            LEDGER_ACCOUNT_REGISTERED,
            meta,
            payload,
            1,
        ));
    }

    let mut correlations: Vec<String> = Vec::new();
    for entry in &input.entries {
        if !correlations.contains(&entry.correlation_id) {
            correlations.push(entry.correlation_id.clone());
        }
    }

    for correlation_id in correlations {
        let batch: Vec<&crate::cycle::EntryInput> = input
            .entries
            .iter()
            .filter(|e| e.correlation_id == correlation_id)
            .collect();
        let entries_json: Vec<Json> = batch
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "account_id": e.account_id,
                    "entry_type": e.entry_type,
                    "money": {"amount": e.amount, "currency": e.currency, "decimals": e.decimals},
                    "timestamp": Utc::now(),
                    "correlation_id": e.correlation_id,
                    "intent_id": e.intent_id,
                    "tx_hash": e.tx_hash,
                })
            })
            .collect();
        let payload = json_object(json!({ "entries": entries_json }));
        let meta = metadata(
            format!("{LEDGER_ENTRIES_POSTED}:{correlation_id}"),
            "attestia-node",
            &correlation_id,
            EventSource::Treasury,
        );
        events.push(attestia_schema::create_versioned_event(
            LEDGER_ENTRIES_POSTED,
            meta,
            payload,
            1,
        ));
    }

    events
}

/// Builds the `registrar.state_registered` events for this cycle's new
/// states, in fixture order (order of appearance becomes `orderIndex`).
pub fn registrar_events(input: &CycleInput) -> Vec<attestia_core::DomainEvent> {
    input
        .states
        .iter()
        .map(|state| {
            let payload = json_object(json!({
                "id": state.id,
                "structure": state.structure,
                "data": state.data,
                "parent_id": state.parent_id,
            }));
            let meta = metadata(
                format!("{REGISTRAR_STATE_REGISTERED}:{}", state.id),
                "attestia-node",
                &format!("state-{}", state.id),
                EventSource::Registrum,
            );
            attestia_schema::create_versioned_event(REGISTRAR_STATE_REGISTERED, meta, payload, 1)
        })
        .collect()
}
