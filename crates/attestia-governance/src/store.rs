use attestia_core::{sha256_canonical, AttestiaError};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::types::{GovernanceEvent, GovernanceEventKind, GovernancePolicy, Signer};

/// Event-sourced registry of signer-set and quorum changes (C11).
///
/// `GovernancePolicy` is never persisted on its own — it is always derived
/// fresh from the event history, here and via [`GovernanceStore::replay_from`],
/// so the audit trail and the runtime policy can never diverge.
#[derive(Default)]
pub struct GovernanceStore {
    events: Vec<GovernanceEvent>,
    signers: Vec<Signer>,
    quorum: u32,
    version: u32,
}

impl GovernanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    pub fn add_signer(
        &mut self,
        address: &str,
        label: &str,
        weight: u32,
        actor: &str,
    ) -> Result<GovernanceEvent, AttestiaError> {
        if weight < 1 {
            return Err(AttestiaError::InvalidInput("signer weight must be >= 1".into()));
        }
        if self.signers.iter().any(|s| s.address == address) {
            return Err(AttestiaError::Conflict(format!(
                "signer already registered: {address}"
            )));
        }
        self.apply(
            GovernanceEventKind::SignerAdded {
                address: address.to_string(),
                label: label.to_string(),
                weight,
            },
            actor,
        )
    }

    pub fn remove_signer(&mut self, address: &str, actor: &str) -> Result<GovernanceEvent, AttestiaError> {
        let remaining_weight: u32 = self
            .signers
            .iter()
            .filter(|s| s.address != address)
            .map(|s| s.weight)
            .sum();
        if !self.signers.iter().any(|s| s.address == address) {
            return Err(AttestiaError::NotFound(format!("unknown signer: {address}")));
        }
        if remaining_weight < self.quorum {
            return Err(AttestiaError::StateTransition(format!(
                "removing {address} would drop total weight below quorum {}",
                self.quorum
            )));
        }
        self.apply(
            GovernanceEventKind::SignerRemoved { address: address.to_string() },
            actor,
        )
    }

    pub fn change_quorum(&mut self, new_quorum: u32, actor: &str) -> Result<GovernanceEvent, AttestiaError> {
        if new_quorum < 1 {
            return Err(AttestiaError::InvalidInput("quorum must be >= 1".into()));
        }
        let total_weight: u32 = self.signers.iter().map(|s| s.weight).sum();
        if !self.signers.is_empty() && new_quorum > total_weight {
            return Err(AttestiaError::InvalidInput(format!(
                "quorum {new_quorum} exceeds total signer weight {total_weight}"
            )));
        }
        self.apply(GovernanceEventKind::QuorumChanged { new_quorum }, actor)
    }

    pub fn rotate_policy(&mut self, reason: &str, actor: &str) -> Result<GovernanceEvent, AttestiaError> {
        self.apply(GovernanceEventKind::PolicyRotated { reason: reason.to_string() }, actor)
    }

    fn apply(&mut self, kind: GovernanceEventKind, actor: &str) -> Result<GovernanceEvent, AttestiaError> {
        self.version += 1;
        let event = GovernanceEvent {
            version: self.version,
            timestamp: Utc::now(),
            actor: actor.to_string(),
            kind,
        };
        apply_in_place(&mut self.signers, &mut self.quorum, &event.kind);
        info!(version = event.version, actor, "governance event applied");
        self.events.push(event.clone());
        Ok(event)
    }

    pub fn get_current_policy(&self) -> GovernancePolicy {
        build_policy(self.version, &self.signers, self.quorum)
    }

    /// Reconstructs state from a fresh event sequence; equal sequences
    /// produce equal final state, and replaying `[]` resets to empty.
    pub fn replay_from(events: Vec<GovernanceEvent>) -> Self {
        let mut signers = Vec::new();
        let mut quorum = 0u32;
        let mut version = 0u32;
        for event in &events {
            apply_in_place(&mut signers, &mut quorum, &event.kind);
            version = event.version;
        }
        Self { events, signers, quorum, version }
    }

    /// Replays only the prefix of `events` up to and including `at_version`.
    pub fn replay_to_version(events: &[GovernanceEvent], at_version: u32) -> Self {
        let prefix: Vec<GovernanceEvent> = events
            .iter()
            .filter(|e| e.version <= at_version)
            .cloned()
            .collect();
        if prefix.is_empty() && at_version > 0 {
            warn!(at_version, "no governance events at or before requested version");
        }
        Self::replay_from(prefix)
    }
}

fn apply_in_place(signers: &mut Vec<Signer>, quorum: &mut u32, kind: &GovernanceEventKind) {
    match kind {
        GovernanceEventKind::SignerAdded { address, label, weight } => {
            signers.push(Signer {
                address: address.clone(),
                label: label.clone(),
                weight: *weight,
                added_at: Utc::now(),
            });
        }
        GovernanceEventKind::SignerRemoved { address } => {
            signers.retain(|s| &s.address != address);
        }
        GovernanceEventKind::QuorumChanged { new_quorum } => {
            *quorum = *new_quorum;
        }
        GovernanceEventKind::PolicyRotated { .. } => {}
    }
}

fn build_policy(version: u32, signers: &[Signer], quorum: u32) -> GovernancePolicy {
    let mut sorted = signers.to_vec();
    sorted.sort_by(|a, b| a.address.cmp(&b.address));
    let id = sha256_canonical(&json!({
        "version": version,
        "signers": sorted,
        "quorum": quorum,
    }));
    GovernancePolicy {
        id,
        version,
        signers: sorted,
        quorum,
        created_at: Utc::now(),
    }
}
