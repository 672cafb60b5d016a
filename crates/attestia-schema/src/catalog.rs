use std::collections::HashMap;

use attestia_core::{AttestiaError, DomainEvent};
use serde_json::Value as Json;
use tracing::info;

use crate::types::{Migration, SchemaDescriptor};

/// Registry of event type -> current schema version + validator, plus a
/// forward-only migration chain keyed by source version (C3).
#[derive(Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, SchemaDescriptor>,
    // (event_type, from_version) -> migration to from_version + 1
    migrations: HashMap<(String, u32), Migration>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema. Re-registering the same `(type, version)` is
    /// idempotent (last writer wins on the validator, no error). Registering
    /// a higher version replaces the catalog's current version for that
    /// type; previously registered migrations are preserved.
    pub fn register(&mut self, descriptor: SchemaDescriptor) {
        let entry = self.schemas.get(&descriptor.event_type);
        let should_replace = match entry {
            None => true,
            Some(existing) => descriptor.version >= existing.version,
        };
        if should_replace {
            info!(
                event_type = %descriptor.event_type,
                version = descriptor.version,
                "schema registered"
            );
            self.schemas.insert(descriptor.event_type.clone(), descriptor);
        }
    }

    pub fn register_migration(
        &mut self,
        event_type: impl Into<String>,
        from_version: u32,
        migration: Migration,
    ) {
        self.migrations
            .insert((event_type.into(), from_version), migration);
    }

    pub fn current_version(&self, event_type: &str) -> Option<u32> {
        self.schemas.get(event_type).map(|s| s.version)
    }

    pub fn validate(&self, event_type: &str, payload: &Json) -> Result<bool, AttestiaError> {
        let schema = self
            .schemas
            .get(event_type)
            .ok_or_else(|| AttestiaError::NotFound(format!("no schema registered for {event_type}")))?;
        Ok((schema.validate)(payload))
    }

    /// Migrates `payload` from `from_version` to the catalog's current
    /// version for `event_type`.
    ///
    /// Forward-compatible: if `from_version` equals or exceeds the current
    /// version, or the type is unknown, returns the payload unchanged
    /// (identity). Otherwise applies migrations `from_version ->
    /// from_version+1 -> ... -> current`; a missing step anywhere in the
    /// chain is a [`AttestiaError::SchemaMigration`] error.
    pub fn migrate(
        &self,
        event_type: &str,
        payload: Json,
        from_version: u32,
    ) -> Result<Json, AttestiaError> {
        let Some(current) = self.current_version(event_type) else {
            return Ok(payload);
        };
        if from_version >= current {
            return Ok(payload);
        }

        let mut value = payload;
        let mut version = from_version;
        while version < current {
            let migration = self
                .migrations
                .get(&(event_type.to_string(), version))
                .ok_or_else(|| {
                    AttestiaError::SchemaMigration(format!(
                        "missing migration for {event_type} from version {version}"
                    ))
                })?;
            value = migration(value);
            version += 1;
        }
        Ok(value)
    }

    /// Upcasts a stored event to the catalog's current schema version. If
    /// no migration is needed, returns the same event reference
    /// (clone-free short-circuit); otherwise returns a new event carrying
    /// the migrated payload and the same metadata.
    pub fn upcast(&self, event: &DomainEvent, stored_version: u32) -> Result<DomainEvent, AttestiaError> {
        let Some(current) = self.current_version(&event.event_type) else {
            return Ok(event.clone());
        };
        if stored_version >= current {
            return Ok(event.clone());
        }

        let payload_json = Json::Object(serde_json::Map::from_iter(
            event.payload.iter().map(|(k, v)| (k.clone(), v.clone())),
        ));
        let migrated = self.migrate(&event.event_type, payload_json, stored_version)?;
        let payload = match migrated {
            Json::Object(map) => map.into_iter().collect(),
            other => {
                let mut m = std::collections::BTreeMap::new();
                m.insert("_value".to_string(), other);
                m
            }
        };
        Ok(DomainEvent {
            event_type: event.event_type.clone(),
            metadata: event.metadata.clone(),
            payload,
        })
    }
}

/// Returns the embedded `_schemaVersion`, falling back to 1 for legacy
/// payloads (missing, non-integer, zero, or negative value).
pub fn get_schema_version(event: &DomainEvent) -> u32 {
    let v = event.schema_version();
    if v < 1 {
        1
    } else {
        v as u32
    }
}

/// Builds a `DomainEvent` carrying an embedded `_schemaVersion` at payload
/// key `_schemaVersion`.
pub fn create_versioned_event(
    event_type: impl Into<String>,
    metadata: attestia_core::EventMetadata,
    mut payload: std::collections::BTreeMap<String, Json>,
    schema_version: u32,
) -> DomainEvent {
    payload.insert("_schemaVersion".to_string(), Json::from(schema_version));
    DomainEvent::new(event_type, metadata, payload)
}
