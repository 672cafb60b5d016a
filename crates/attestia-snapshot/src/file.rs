use std::fs;
use std::path::{Path, PathBuf};

use attestia_core::AttestiaError;
use serde_json::Value as Json;

use crate::types::StreamSnapshot;

/// File-backed variant of the snapshot store, sharing the in-memory
/// variant's contract: one subdirectory per stream (sanitised for
/// filesystem use), one file per version inside it. Persists across
/// instance recreation over the same base directory.
pub struct FileSnapshotStore {
    base_dir: PathBuf,
}

impl FileSnapshotStore {
    /// Opens (creating if absent) the snapshot directory rooted at `base_dir`.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self, AttestiaError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .map_err(|e| AttestiaError::Storage(format!("creating snapshot base dir: {e}")))?;
        Ok(Self { base_dir })
    }

    fn stream_dir(&self, stream_id: &str) -> PathBuf {
        self.base_dir.join(sanitize_stream_id(stream_id))
    }

    fn version_path(&self, stream_id: &str, version: u64) -> PathBuf {
        self.stream_dir(stream_id).join(format!("{version}.json"))
    }

    pub fn save(&self, stream_id: &str, version: u64, state: Json) -> Result<(), AttestiaError> {
        let snapshot = StreamSnapshot {
            stream_id: stream_id.to_string(),
            version,
            state,
            saved_at: chrono::Utc::now(),
        };
        let dir = self.stream_dir(stream_id);
        fs::create_dir_all(&dir)
            .map_err(|e| AttestiaError::Storage(format!("creating stream snapshot dir: {e}")))?;
        let body = attestia_core::canonical_json(&snapshot);
        fs::write(self.version_path(stream_id, version), body)
            .map_err(|e| AttestiaError::Storage(format!("writing snapshot file: {e}")))?;
        Ok(())
    }

    pub fn load(&self, stream_id: &str) -> Option<StreamSnapshot> {
        let latest = self.versions_on_disk(stream_id).into_iter().max()?;
        self.load_at_version(stream_id, latest)
    }

    pub fn load_at_version(&self, stream_id: &str, version: u64) -> Option<StreamSnapshot> {
        let path = self.version_path(stream_id, version);
        let body = fs::read_to_string(path).ok()?;
        serde_json::from_str(&body).ok()
    }

    /// Deleting a stream's snapshot directory is best-effort: I/O errors are
    /// suppressed per the core specification's local-recovery rules.
    pub fn delete_all(&self, stream_id: &str) -> Result<(), AttestiaError> {
        let _ = fs::remove_dir_all(self.stream_dir(stream_id));
        Ok(())
    }

    pub fn has_snapshot(&self, stream_id: &str) -> bool {
        !self.versions_on_disk(stream_id).is_empty()
    }

    fn versions_on_disk(&self, stream_id: &str) -> Vec<u64> {
        let dir = self.stream_dir(stream_id);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| name.strip_suffix(".json").map(|v| v.to_string()))
            .filter_map(|v| v.parse::<u64>().ok())
            .collect()
    }
}

/// Replaces filesystem-hostile characters (`/`, `\`, `:`, and other path
/// separators/reserved characters) with `_` so any streamId can become a
/// directory name on any platform.
fn sanitize_stream_id(stream_id: &str) -> String {
    stream_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
