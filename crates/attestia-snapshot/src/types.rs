use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use attestia_core::Timestamp;

/// A versioned snapshot of some stream's derived state, per the core
/// specification's `SnapshotStore` contract. `state` is stored as opaque
/// JSON so the same store can hold ledger, registrar, or any other
/// projector's serialized state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    pub stream_id: String,
    pub version: u64,
    pub state: Json,
    pub saved_at: Timestamp,
}
