pub mod package;
pub mod tree;
pub mod types;

pub use package::{build_proof_package, verify_proof_package};
pub use tree::{verify_inclusion_proof, MerkleTree};
pub use types::{Direction, InclusionProof, ProofPackage, Sibling};

#[cfg(test)]
mod tests {
    use super::*;
    use attestia_core::sha256_canonical;
    use attestia_crypto::hash::sha256_hex;
    use serde_json::json;

    fn leaves(n: usize) -> Vec<String> {
        (0..n).map(|i| sha256_hex(format!("leaf-{i}").as_bytes())).collect()
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = MerkleTree::build(&[]);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn single_leaf_tree_root_is_the_leaf() {
        let ls = leaves(1);
        let tree = MerkleTree::build(&ls);
        assert_eq!(tree.root(), Some(ls[0].clone()));
    }

    #[test]
    fn proof_round_trips_for_every_index() {
        let ls = leaves(7);
        let tree = MerkleTree::build(&ls);
        for i in 0..ls.len() {
            let proof = tree.build_proof(i).unwrap();
            assert!(verify_inclusion_proof(&proof), "leaf {i} should verify");
            assert_eq!(proof.root, tree.root().unwrap());
        }
    }

    #[test]
    fn flipping_the_leaf_hash_breaks_verification() {
        let ls = leaves(4);
        let tree = MerkleTree::build(&ls);
        let mut proof = tree.build_proof(1).unwrap();
        proof.leaf_hash = "0".repeat(64);
        assert!(!verify_inclusion_proof(&proof));
    }

    #[test]
    fn flipping_a_sibling_breaks_verification() {
        let ls = leaves(4);
        let tree = MerkleTree::build(&ls);
        let mut proof = tree.build_proof(0).unwrap();
        proof.siblings[0].hash = "0".repeat(64);
        assert!(!verify_inclusion_proof(&proof));
    }

    #[test]
    fn flipping_the_declared_root_breaks_verification() {
        let ls = leaves(4);
        let tree = MerkleTree::build(&ls);
        let mut proof = tree.build_proof(2).unwrap();
        proof.root = "0".repeat(64);
        assert!(!verify_inclusion_proof(&proof));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let ls = leaves(3);
        let tree = MerkleTree::build(&ls);
        assert!(tree.build_proof(3).is_err());
    }

    /// S5: two attestations, 64-char hex root, proof for attestation #2 has
    /// leafIndex = 1, tampering attestationHash yields valid: false.
    #[test]
    fn s5_two_attestation_package_scenario() {
        let att1 = json!({"reportId": "r1", "stateCount": 3});
        let att2 = json!({"reportId": "r2", "stateCount": 5});
        let ls = vec![sha256_canonical(&att1), sha256_canonical(&att2)];

        let tree = MerkleTree::build(&ls);
        let root = tree.root().unwrap();
        assert_eq!(root.len(), 64);

        let package = build_proof_package(&ls, 1, att2.clone()).unwrap();
        assert_eq!(package.inclusion_proof.leaf_index, 1);
        assert_eq!(package.merkle_root, root);
        assert!(verify_proof_package(&package));

        let mut tampered = package.clone();
        tampered.attestation_hash = "0".repeat(64);
        assert!(!verify_proof_package(&tampered));
    }

    #[test]
    fn tampering_package_hash_is_detected() {
        let ls = leaves(3);
        let package = build_proof_package(&ls, 0, json!({"x": 1})).unwrap();
        let mut tampered = package.clone();
        tampered.package_hash = "0".repeat(64);
        assert!(!verify_proof_package(&tampered));
    }
}
