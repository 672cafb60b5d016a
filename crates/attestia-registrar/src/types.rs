use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// An append-only registered domain state (C5). `orderIndex` is the
/// unique authoritative ordering for the Registrum subsystem hash — it is
/// assigned by the registrar at append time, not supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisteredState {
    pub id: String,
    pub structure: String,
    pub data: Json,
    pub order_index: u64,
    pub parent_id: Option<String>,
}

/// Caller-supplied request to register a new state transition.
#[derive(Clone, Debug)]
pub struct RegisterRequest {
    pub id: String,
    pub structure: String,
    pub data: Json,
    pub parent_id: Option<String>,
}

/// How the registrar's invariant set treats state structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrarMode {
    /// `parentId`, if present, must reference an already-registered state.
    Strict,
    /// `parentId` is recorded but not validated against existing states.
    Lenient,
}

impl Default for RegistrarMode {
    fn default() -> Self {
        RegistrarMode::Strict
    }
}

/// Ordered, immutable snapshot of a registrar's states, plus the mode and
/// invariant set under which they were appended.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrarSnapshot {
    pub states: Vec<RegisteredState>,
    pub mode: Option<RegistrarMode>,
}
