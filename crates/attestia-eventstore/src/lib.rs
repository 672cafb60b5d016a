pub mod chain;
pub mod core;
pub mod file;
pub mod memory;
pub mod subscribe;
pub mod types;

pub use chain::{compute_hash, verify_hash_chain};
pub use file::FileEventStore;
pub use memory::InMemoryEventStore;
pub use subscribe::SubscriptionHandle;
pub use types::{
    AppendOptions, AppendResult, ChainError, Direction, ExpectedVersion, ReadAllOptions,
    ReadOptions, VerifyResult,
};
