use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::signature::Signature;

/// An Attestia signer keypair: ed25519, the classical scheme real EVM /
/// Solana / XRPL governance signers and witness wallets speak.
pub struct KeyPair {
    pub address: String,
    pub verifying_key: VerifyingKey,
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh ed25519 keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Restore a keypair from its 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        let address = hex::encode(verifying_key.to_bytes());
        Self {
            address,
            verifying_key,
            signing_key,
        }
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes().to_vec())
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key.to_bytes())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair {{ address: {} }}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"hello");
        assert!(crate::signature::verify_signature(&kp.verifying_key, b"hello", &sig).is_ok());
    }

    #[test]
    fn seed_is_deterministic() {
        let a = KeyPair::from_seed([7u8; 32]);
        let b = KeyPair::from_seed([7u8; 32]);
        assert_eq!(a.address, b.address);
    }
}
