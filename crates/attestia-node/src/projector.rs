//! Rebuilds the ledger and registrar projections from scratch by
//! replaying their streams out of the event store (§2: "projectors update
//! C4/C5"). Each cycle starts from a fresh `Ledger`/`Registrar` and folds
//! the full stream history — the only source of truth is the event log.

use attestia_core::StoredEvent;
use attestia_eventstore::{FileEventStore, ReadOptions};
use attestia_ledger::{Account, AppendOptions as LedgerAppendOptions, Ledger, LedgerEntry};
use attestia_registrar::{RegisterRequest, Registrar, RegistrarMode};
use attestia_schema::SchemaCatalog;
use tracing::warn;

use crate::commands::{LEDGER_STREAM, REGISTRAR_STREAM};
use crate::schema::{LEDGER_ACCOUNT_REGISTERED, LEDGER_ENTRIES_POSTED, REGISTRAR_STATE_REGISTERED};

fn upcast_payload(event: &StoredEvent, catalog: &SchemaCatalog) -> serde_json::Value {
    let stored_version = event.event.schema_version().max(1) as u32;
    match catalog.upcast(&event.event, stored_version) {
        Ok(upcast) => serde_json::Value::Object(serde_json::Map::from_iter(
            upcast.payload.iter().map(|(k, v)| (k.clone(), v.clone())),
        )),
        Err(e) => {
            warn!(event_id = %event.event.metadata.event_id, error = %e, "schema migration failed, using raw payload");
            serde_json::Value::Object(serde_json::Map::from_iter(
                event.event.payload.iter().map(|(k, v)| (k.clone(), v.clone())),
            ))
        }
    }
}

pub fn project_ledger(store: &FileEventStore, catalog: &SchemaCatalog) -> Ledger {
    let mut ledger = Ledger::new();
    let events = store
        .read(LEDGER_STREAM, ReadOptions::default())
        .unwrap_or_default();

    for event in &events {
        let payload = upcast_payload(event, catalog);
        match event.event.event_type.as_str() {
            LEDGER_ACCOUNT_REGISTERED => {
                let Some(raw) = payload.get("account") else {
                    warn!(event_id = %event.event.metadata.event_id, "account_registered event missing account field");
                    continue;
                };
                match parse_account(raw) {
                    Ok(account) => {
                        if let Err(e) = ledger.register_account(account) {
                            warn!(error = %e, "skipping account registration during replay");
                        }
                    }
                    Err(e) => warn!(error = %e, "failed to parse account payload during replay"),
                }
            }
            LEDGER_ENTRIES_POSTED => {
                let Some(raw_entries) = payload.get("entries").and_then(|v| v.as_array()) else {
                    warn!(event_id = %event.event.metadata.event_id, "entries_posted event missing entries array");
                    continue;
                };
                let parsed: Result<Vec<LedgerEntry>, _> = raw_entries
                    .iter()
                    .cloned()
                    .map(serde_json::from_value)
                    .collect();
                match parsed {
                    Ok(entries) => {
                        if let Err(e) = ledger.append(entries, LedgerAppendOptions::default()) {
                            warn!(error = %e, correlation_id = %event.event.metadata.correlation_id, "ledger batch rejected during replay");
                        }
                    }
                    Err(e) => warn!(error = %e, "failed to parse ledger entries during replay"),
                }
            }
            other => warn!(event_type = other, "unrecognised event on ledger stream, skipped"),
        }
    }

    ledger
}

pub fn project_registrar(store: &FileEventStore, catalog: &SchemaCatalog) -> Registrar {
    let mut registrar = Registrar::new(RegistrarMode::Strict);
    let events = store
        .read(REGISTRAR_STREAM, ReadOptions::default())
        .unwrap_or_default();

    for event in &events {
        let payload = upcast_payload(event, catalog);
        if event.event.event_type != REGISTRAR_STATE_REGISTERED {
            warn!(event_type = %event.event.event_type, "unrecognised event on registrar stream, skipped");
            continue;
        }
        let request = RegisterRequest {
            id: payload.get("id").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            structure: payload.get("structure").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            data: payload.get("data").cloned().unwrap_or(serde_json::Value::Null),
            parent_id: payload.get("parent_id").and_then(|v| v.as_str()).map(String::from),
        };
        if let Err(e) = registrar.register(request) {
            warn!(error = %e, "skipping state registration during replay");
        }
    }

    registrar
}

fn parse_account(raw: &serde_json::Value) -> Result<Account, serde_json::Error> {
    serde_json::from_value(raw.clone())
}
