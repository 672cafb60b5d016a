use ed25519_dalek::{Verifier, VerifyingKey, SIGNATURE_LENGTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid signature length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("signature verification failed")]
    VerificationFailed,
}

/// Raw ed25519 signature bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({}b)", self.0.len())
    }
}

impl Signature {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// Verify `signature` over `message` against `public_key`.
pub fn verify_signature(
    public_key: &VerifyingKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SignatureError> {
    if signature.0.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength {
            expected: SIGNATURE_LENGTH,
            got: signature.0.len(),
        });
    }
    let mut raw = [0u8; SIGNATURE_LENGTH];
    raw.copy_from_slice(&signature.0);
    let sig = ed25519_dalek::Signature::from_bytes(&raw);
    public_key
        .verify(message, &sig)
        .map_err(|_| SignatureError::VerificationFailed)
}

/// Verify a signature given a hex-encoded public key, as used by governance
/// signer records keyed by address (= hex-encoded public key here).
pub fn verify_signature_hex(
    public_key_hex: &str,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SignatureError> {
    let bytes = hex::decode(public_key_hex).map_err(|_| SignatureError::InvalidPublicKey)?;
    let arr: [u8; 32] = bytes.try_into().map_err(|_| SignatureError::InvalidPublicKey)?;
    let key = VerifyingKey::from_bytes(&arr).map_err(|_| SignatureError::InvalidPublicKey)?;
    verify_signature(&key, message, signature)
}
