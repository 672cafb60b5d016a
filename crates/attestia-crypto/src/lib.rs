pub mod hash;
pub mod keypair;
pub mod signature;

pub use hash::sha256_hex;
pub use keypair::KeyPair;
pub use signature::{verify_signature, Signature, SignatureError};
