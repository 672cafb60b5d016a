pub mod gsh;
pub mod types;

pub use gsh::{compute_global_state_hash, create_state_bundle, recompute_bundle_hash};
pub use types::{ExportableStateBundle, GlobalStateHash, Subsystems};
