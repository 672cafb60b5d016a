use std::collections::HashSet;

use attestia_core::AttestiaError;
use tracing::info;

use crate::types::{RegisterRequest, RegisteredState, RegistrarMode, RegistrarSnapshot};

/// Append-only registered-state graph (C5): the same append-only
/// discipline as the event log, applied to domain states rather than
/// events. State ordering (`orderIndex`) is the unique authoritative
/// ordering fed into the Registrum subsystem hash.
pub struct Registrar {
    mode: RegistrarMode,
    states: Vec<RegisteredState>,
    ids: HashSet<String>,
}

impl Registrar {
    pub fn new(mode: RegistrarMode) -> Self {
        Self {
            mode,
            states: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Appends a new state. In [`RegistrarMode::Strict`], a supplied
    /// `parentId` must reference an already-registered state.
    pub fn register(&mut self, request: RegisterRequest) -> Result<RegisteredState, AttestiaError> {
        if request.id.trim().is_empty() {
            return Err(AttestiaError::InvalidInput("state id must not be empty".into()));
        }
        if self.ids.contains(&request.id) {
            return Err(AttestiaError::Conflict(format!(
                "state already registered: {}",
                request.id
            )));
        }
        if let Some(parent) = &request.parent_id {
            if self.mode == RegistrarMode::Strict && !self.ids.contains(parent) {
                return Err(AttestiaError::NotFound(format!(
                    "parent state not registered: {parent}"
                )));
            }
        }

        let state = RegisteredState {
            id: request.id.clone(),
            structure: request.structure,
            data: request.data,
            order_index: self.states.len() as u64,
            parent_id: request.parent_id,
        };
        self.ids.insert(state.id.clone());
        self.states.push(state.clone());
        info!(state_id = %state.id, order_index = state.order_index, "registrar state appended");
        Ok(state)
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredState> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[RegisteredState] {
        &self.states
    }

    pub fn snapshot(&self) -> RegistrarSnapshot {
        RegistrarSnapshot {
            states: self.states.clone(),
            mode: Some(self.mode),
        }
    }

    pub fn from_snapshot(snapshot: RegistrarSnapshot) -> Self {
        let mode = snapshot.mode.unwrap_or_default();
        let mut ids = HashSet::with_capacity(snapshot.states.len());
        for s in &snapshot.states {
            ids.insert(s.id.clone());
        }
        Self {
            mode,
            states: snapshot.states,
            ids,
        }
    }
}
