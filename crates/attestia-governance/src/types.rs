use attestia_core::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signer {
    pub address: String,
    pub label: String,
    pub weight: u32,
    pub added_at: Timestamp,
}

/// Governance change events, each carrying `version`, `timestamp`, and
/// `actor` at the envelope level (see [`GovernanceEvent`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GovernanceEventKind {
    SignerAdded { address: String, label: String, weight: u32 },
    SignerRemoved { address: String },
    QuorumChanged { new_quorum: u32 },
    PolicyRotated { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernanceEvent {
    pub version: u32,
    pub timestamp: Timestamp,
    pub actor: String,
    #[serde(flatten)]
    pub kind: GovernanceEventKind,
}

/// Immutable value snapshot of the signer set and quorum at a given
/// version. `id` is recomputed from `{version, signers sorted, quorum}`
/// on every transition, never stored independently of the replayed
/// event stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernancePolicy {
    pub id: String,
    pub version: u32,
    pub signers: Vec<Signer>,
    pub quorum: u32,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub address: String,
    pub signature: String,
}

/// Quorum outcome carried alongside an [`AggregatedSignature`]: whether the
/// aggregate met the policy's quorum, the weight figures behind that
/// verdict, and which policy signers did/didn't contribute a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quorum {
    pub met: bool,
    pub total_weight: u32,
    pub required_weight: u32,
    pub signer_addresses: Vec<String>,
    pub missing_addresses: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSignature {
    pub payload_hash: String,
    pub policy_id: String,
    pub signatures: Vec<SignatureEntry>,
    pub quorum: Quorum,
    pub aggregated_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateRef {
    pub policy_id: String,
    pub policy_version: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorityValidation {
    pub valid: bool,
    pub rejections: Vec<String>,
}
