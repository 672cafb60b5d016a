use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// RFC 3339 timestamp, always rendered/parsed through `chrono`.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lower-case hex-encoded SHA-256 digest (64 characters).
pub type Hex32 = String;

/// Source subsystem that originated a domain event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Vault,
    Treasury,
    Registrum,
    Observer,
}

/// Metadata envelope carried by every domain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: String,
    pub timestamp: Timestamp,
    pub actor: String,
    pub correlation_id: String,
    pub source: EventSource,
}

/// An immutable domain event prior to being appended to a stream.
///
/// `payload` carries an optional embedded `_schemaVersion` integer (>= 1)
/// used by the schema catalog; absence means version 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub metadata: EventMetadata,
    pub payload: BTreeMap<String, Json>,
}

impl DomainEvent {
    pub fn new(
        event_type: impl Into<String>,
        metadata: EventMetadata,
        payload: BTreeMap<String, Json>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            metadata,
            payload,
        }
    }

    /// Returns the embedded `_schemaVersion`, falling back to 1 for legacy
    /// payloads (missing, non-integer, zero, or negative value).
    pub fn schema_version(&self) -> i64 {
        match self.payload.get("_schemaVersion") {
            Some(Json::Number(n)) => match n.as_i64() {
                Some(v) if v >= 1 => v,
                _ => 1,
            },
            _ => 1,
        }
    }
}

/// A `DomainEvent` wrapped with hash-chain and ordering metadata, as it is
/// durably stored by the event store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub stream_id: String,
    pub version: u64,
    pub global_position: u64,
    pub appended_at: Timestamp,
    pub previous_hash: Hex32,
    pub hash: Hex32,
    pub event: DomainEvent,
}
