//! Built-in event schemas for the two projected streams this node drives
//! directly: ledger postings and registrar state transitions (C3).

use std::sync::Arc;

use attestia_schema::{SchemaCatalog, SchemaDescriptor};

pub const LEDGER_ACCOUNT_REGISTERED: &str = "ledger.account_registered";
pub const LEDGER_ENTRIES_POSTED: &str = "ledger.entries_posted";
pub const REGISTRAR_STATE_REGISTERED: &str = "registrar.state_registered";

pub fn build_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();

    catalog.register(SchemaDescriptor {
        event_type: LEDGER_ACCOUNT_REGISTERED.to_string(),
        version: 1,
        description: "registers a ledger account".to_string(),
        source: "attestia-node".to_string(),
        validate: Arc::new(|payload| payload.get("account").is_some()),
    });

    catalog.register(SchemaDescriptor {
        event_type: LEDGER_ENTRIES_POSTED.to_string(),
        version: 1,
        description: "posts a balanced batch of ledger entries".to_string(),
        source: "attestia-node".to_string(),
        validate: Arc::new(|payload| payload.get("entries").and_then(|v| v.as_array()).is_some()),
    });

    catalog.register(SchemaDescriptor {
        event_type: REGISTRAR_STATE_REGISTERED.to_string(),
        version: 1,
        description: "registers a state in the registrar".to_string(),
        source: "attestia-node".to_string(),
        validate: Arc::new(|payload| payload.get("id").and_then(|v| v.as_str()).is_some()),
    });

    catalog
}
