use std::collections::BTreeMap;
use std::sync::Mutex;

use attestia_core::AttestiaError;
use serde_json::Value as Json;

use crate::types::StreamSnapshot;

/// In-memory variant of the snapshot store: `streamId -> {version -> state}`.
/// Same-version saves overwrite; deleting one stream never affects another.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    streams: Mutex<BTreeMap<String, BTreeMap<u64, StreamSnapshot>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, stream_id: &str, version: u64, state: Json) -> Result<(), AttestiaError> {
        let snapshot = StreamSnapshot {
            stream_id: stream_id.to_string(),
            version,
            state,
            saved_at: chrono::Utc::now(),
        };
        let mut streams = self.streams.lock().unwrap();
        streams
            .entry(stream_id.to_string())
            .or_default()
            .insert(version, snapshot);
        Ok(())
    }

    pub fn load(&self, stream_id: &str) -> Option<StreamSnapshot> {
        let streams = self.streams.lock().unwrap();
        streams
            .get(stream_id)
            .and_then(|versions| versions.values().next_back())
            .cloned()
    }

    pub fn load_at_version(&self, stream_id: &str, version: u64) -> Option<StreamSnapshot> {
        let streams = self.streams.lock().unwrap();
        streams.get(stream_id).and_then(|versions| versions.get(&version)).cloned()
    }

    pub fn delete_all(&self, stream_id: &str) -> Result<(), AttestiaError> {
        let mut streams = self.streams.lock().unwrap();
        streams.remove(stream_id);
        Ok(())
    }

    pub fn has_snapshot(&self, stream_id: &str) -> bool {
        let streams = self.streams.lock().unwrap();
        streams.get(stream_id).map(|v| !v.is_empty()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_and_load_latest() {
        let store = InMemorySnapshotStore::new();
        store.save("s1", 1, json!({"a": 1})).unwrap();
        store.save("s1", 2, json!({"a": 2})).unwrap();

        let latest = store.load("s1").unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.state, json!({"a": 2}));
    }

    #[test]
    fn load_at_version_returns_specific_snapshot() {
        let store = InMemorySnapshotStore::new();
        store.save("s1", 1, json!({"a": 1})).unwrap();
        store.save("s1", 2, json!({"a": 2})).unwrap();

        let v1 = store.load_at_version("s1", 1).unwrap();
        assert_eq!(v1.state, json!({"a": 1}));
        assert!(store.load_at_version("s1", 3).is_none());
    }

    #[test]
    fn same_version_save_overwrites() {
        let store = InMemorySnapshotStore::new();
        store.save("s1", 1, json!({"a": 1})).unwrap();
        store.save("s1", 1, json!({"a": 99})).unwrap();

        let snap = store.load_at_version("s1", 1).unwrap();
        assert_eq!(snap.state, json!({"a": 99}));
    }

    #[test]
    fn delete_all_is_isolated_to_one_stream() {
        let store = InMemorySnapshotStore::new();
        store.save("s1", 1, json!({"a": 1})).unwrap();
        store.save("s2", 1, json!({"b": 1})).unwrap();

        store.delete_all("s1").unwrap();
        assert!(!store.has_snapshot("s1"));
        assert!(store.has_snapshot("s2"));
    }

    #[test]
    fn load_of_unknown_stream_is_none_not_error() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load("nope").is_none());
        assert!(!store.has_snapshot("nope"));
    }
}
