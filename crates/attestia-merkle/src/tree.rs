use attestia_core::AttestiaError;
use attestia_crypto::hash::sha256_hex;

use crate::types::{Direction, InclusionProof, Sibling};

/// Binary SHA-256 Merkle tree over attestation hashes, leaves kept in
/// insertion order (C9). An odd node at any level is duplicated (promoted)
/// to balance the tree, rather than left unpaired.
pub struct MerkleTree {
    levels: Vec<Vec<String>>,
}

fn hash_pair(left_hex: &str, right_hex: &str) -> String {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&hex::decode(left_hex).unwrap_or_default());
    bytes.extend_from_slice(&hex::decode(right_hex).unwrap_or_default());
    sha256_hex(&bytes)
}

impl MerkleTree {
    /// Builds a tree over `leaves` (attestation hashes, insertion order).
    /// An empty input yields an empty tree (`root() == None`).
    pub fn build(leaves: &[String]) -> Self {
        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }
        let mut levels = vec![leaves.to_vec()];
        let mut current = leaves.to_vec();
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            let mut i = 0;
            while i < current.len() {
                let left = &current[i];
                let right = current.get(i + 1).unwrap_or(left);
                next.push(hash_pair(left, right));
                i += 2;
            }
            levels.push(next.clone());
            current = next;
        }
        Self { levels }
    }

    pub fn root(&self) -> Option<String> {
        self.levels.last().and_then(|top| top.first().cloned())
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map(|l| l.len()).unwrap_or(0)
    }

    /// Builds an inclusion proof for the leaf at `index`.
    pub fn build_proof(&self, index: usize) -> Result<InclusionProof, AttestiaError> {
        if self.levels.is_empty() || index >= self.leaf_count() {
            return Err(AttestiaError::NotFound(format!(
                "leaf index {index} out of range"
            )));
        }
        let leaf_hash = self.levels[0][index].clone();
        let root = self.root().expect("non-empty tree has a root");

        let mut siblings = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let (sibling_idx, direction) = if idx % 2 == 0 {
                (idx + 1, Direction::Right)
            } else {
                (idx - 1, Direction::Left)
            };
            let sibling_hash = level.get(sibling_idx).cloned().unwrap_or_else(|| level[idx].clone());
            siblings.push(Sibling {
                hash: sibling_hash,
                direction,
            });
            idx /= 2;
        }

        Ok(InclusionProof {
            leaf_hash,
            leaf_index: index,
            siblings,
            root,
        })
    }
}

/// Recomputes the root implied by `proof` and checks it against
/// `proof.root`. Flipping any bit of the leaf, any sibling, or the
/// declared root makes this return `false`.
pub fn verify_inclusion_proof(proof: &InclusionProof) -> bool {
    let mut current = proof.leaf_hash.clone();
    for sibling in &proof.siblings {
        current = match sibling.direction {
            Direction::Left => hash_pair(&sibling.hash, &current),
            Direction::Right => hash_pair(&current, &sibling.hash),
        };
    }
    current == proof.root
}
