use attestia_core::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sibling {
    pub hash: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InclusionProof {
    pub leaf_hash: String,
    pub leaf_index: usize,
    pub siblings: Vec<Sibling>,
    pub root: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofPackage<A> {
    pub version: u32,
    pub attestation: A,
    pub attestation_hash: String,
    pub merkle_root: String,
    pub inclusion_proof: InclusionProof,
    pub packaged_at: Timestamp,
    pub package_hash: String,
}
