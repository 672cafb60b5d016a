pub mod file;
pub mod memory;
pub mod store;
pub mod types;

pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use store::SnapshotStore;
pub use types::StreamSnapshot;
