use attestia_core::sha256_canonical;
use chrono::Utc;
use serde::Serialize;

use crate::tree::{verify_inclusion_proof, MerkleTree};
use crate::types::{InclusionProof, ProofPackage};

/// Packages a single attestation together with its inclusion proof against
/// a tree built over `leaves` (C9). `attestation` must already be the value
/// hashed into `leaves[index]` by the caller.
pub fn build_proof_package<A: Serialize + Clone>(
    leaves: &[String],
    index: usize,
    attestation: A,
) -> Result<ProofPackage<A>, attestia_core::AttestiaError> {
    let tree = MerkleTree::build(leaves);
    let proof = tree.build_proof(index)?;
    let attestation_hash = sha256_canonical(&attestation);
    let merkle_root = proof.root.clone();

    let mut package = ProofPackage {
        version: 1,
        attestation,
        attestation_hash,
        merkle_root,
        inclusion_proof: proof,
        packaged_at: Utc::now(),
        package_hash: String::new(),
    };
    package.package_hash = recompute_package_hash(&package);
    Ok(package)
}

fn recompute_package_hash<A: Serialize>(package: &ProofPackage<A>) -> String {
    sha256_canonical(&serde_json::json!({
        "version": package.version,
        "attestation": package.attestation,
        "attestationHash": package.attestation_hash,
        "merkleRoot": package.merkle_root,
        "inclusionProof": package.inclusion_proof,
    }))
}

/// Verifies a `ProofPackage` end to end: the inclusion proof recomputes its
/// own root, `attestationHash` matches a fresh hash of `attestation`, and
/// `packageHash` matches a fresh recompute. Any single failure is `false`.
pub fn verify_proof_package<A: Serialize>(package: &ProofPackage<A>) -> bool {
    if !verify_inclusion_proof(&package.inclusion_proof) {
        return false;
    }
    if package.inclusion_proof.root != package.merkle_root {
        return false;
    }
    if sha256_canonical(&package.attestation) != package.attestation_hash {
        return false;
    }
    recompute_package_hash(package) == package.package_hash
}
