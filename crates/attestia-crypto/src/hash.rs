use sha2::{Digest, Sha256};

/// Compute SHA-256 of arbitrary bytes, lower-case hex-encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute SHA-256 of arbitrary bytes, raw 32-byte array.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// The hash chain link for the next event in a stream:
/// `sha256(canonical_bytes ++ previous_hash_bytes)`.
pub fn chain_hash(canonical_bytes: &[u8], previous_hash_hex: &str) -> String {
    let mut data = Vec::with_capacity(canonical_bytes.len() + previous_hash_hex.len());
    data.extend_from_slice(canonical_bytes);
    data.extend_from_slice(previous_hash_hex.as_bytes());
    sha256_hex(&data)
}
