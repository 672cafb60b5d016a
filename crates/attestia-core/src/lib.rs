pub mod canonical;
pub mod constants;
pub mod error;
pub mod money;
pub mod types;

pub use canonical::{canonical_json, sha256_canonical, sha256_hex};
pub use constants::*;
pub use error::AttestiaError;
pub use money::{format_amount, parse_amount, Money};
pub use types::*;
