use std::collections::HashMap;
use std::sync::Arc;

use attestia_core::{AttestiaError, DomainEvent, StoredEvent, GENESIS_HASH};
use chrono::Utc;

use crate::chain::compute_hash;
use crate::types::{AppendOptions, AppendResult, Direction, ExpectedVersion, ReadAllOptions, ReadOptions};

/// Shared append/read bookkeeping used by both the in-memory and
/// file-backed event store. Holds the authoritative stream index and
/// global log; persistence (if any) happens around calls to [`append`].
#[derive(Default)]
pub(crate) struct StoreCore {
    streams: HashMap<String, Vec<Arc<StoredEvent>>>,
    global: Vec<Arc<StoredEvent>>,
}

impl StoreCore {
    pub(crate) fn stream_version(&self, stream_id: &str) -> u64 {
        self.streams.get(stream_id).map(|v| v.len() as u64).unwrap_or(0)
    }

    pub(crate) fn global_position(&self) -> u64 {
        self.global.len() as u64
    }

    pub(crate) fn stream_exists(&self, stream_id: &str) -> bool {
        self.streams.contains_key(stream_id)
    }

    fn last_hash(&self, stream_id: &str) -> String {
        self.streams
            .get(stream_id)
            .and_then(|v| v.last())
            .map(|e| e.hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string())
    }

    /// Reconstructs the index from a sequence of already-stored events, as
    /// read back from a persisted file. Used only at startup.
    pub(crate) fn reindex(&mut self, events: Vec<StoredEvent>) {
        self.streams.clear();
        self.global.clear();
        for event in events {
            let shared = Arc::new(event);
            self.streams
                .entry(shared.stream_id.clone())
                .or_default()
                .push(shared.clone());
            self.global.push(shared);
        }
    }

    /// Validates and stages an append, returning the new `StoredEvent`s
    /// without committing them. All-or-nothing: callers must not observe
    /// any partial mutation if this returns `Err`.
    pub(crate) fn stage_append(
        &self,
        stream_id: &str,
        events: &[DomainEvent],
        opts: AppendOptions,
    ) -> Result<Vec<StoredEvent>, AttestiaError> {
        if stream_id.trim().is_empty() {
            return Err(AttestiaError::InvalidInput("InvalidStreamId".into()));
        }
        if events.is_empty() {
            return Err(AttestiaError::InvalidInput("EmptyAppend".into()));
        }

        let current_version = self.stream_version(stream_id);
        if let Some(expected) = &opts.expected_version {
            match expected {
                ExpectedVersion::Exact(v) => {
                    if *v != current_version {
                        return Err(AttestiaError::ConcurrencyConflict(format!(
                            "at version {current_version}, expected {v}"
                        )));
                    }
                }
                ExpectedVersion::NoStream => {
                    if self.stream_exists(stream_id) {
                        return Err(AttestiaError::ConcurrencyConflict(
                            "stream already exists".into(),
                        ));
                    }
                }
                ExpectedVersion::Any => {}
            }
        }

        let mut previous_hash = self.last_hash(stream_id);
        let mut version = current_version;
        let mut global_position = self.global_position();
        let mut staged = Vec::with_capacity(events.len());

        for event in events {
            version += 1;
            global_position += 1;
            let appended_at = Utc::now();
            let hash = compute_hash(
                event,
                stream_id,
                version,
                global_position,
                &appended_at,
                &previous_hash,
            );
            staged.push(StoredEvent {
                stream_id: stream_id.to_string(),
                version,
                global_position,
                appended_at,
                previous_hash: previous_hash.clone(),
                hash: hash.clone(),
                event: event.clone(),
            });
            previous_hash = hash;
        }

        Ok(staged)
    }

    /// Commits previously staged events into the index. Infallible: staging
    /// already performed all validation.
    pub(crate) fn commit(&mut self, staged: Vec<StoredEvent>) -> AppendResult {
        let stream_id = staged[0].stream_id.clone();
        let from_version = staged[0].version;
        let to_version = staged.last().unwrap().version;
        let count = staged.len();

        for event in staged {
            let shared = Arc::new(event);
            self.streams
                .entry(stream_id.clone())
                .or_default()
                .push(shared.clone());
            self.global.push(shared);
        }

        AppendResult {
            stream_id,
            from_version,
            to_version,
            count,
        }
    }

    pub(crate) fn read(&self, stream_id: &str, opts: ReadOptions) -> Result<Vec<StoredEvent>, AttestiaError> {
        if let Some(v) = opts.from_version {
            if v < 1 {
                return Err(AttestiaError::InvalidInput("InvalidVersion".into()));
            }
        }
        let from_version = opts.from_version.unwrap_or(1);
        let events = match self.streams.get(stream_id) {
            Some(events) => events,
            None => return Ok(Vec::new()),
        };

        let mut slice: Vec<StoredEvent> = events
            .iter()
            .filter(|e| e.version >= from_version)
            .map(|e| (**e).clone())
            .collect();

        if opts.direction == Direction::Backward {
            slice.reverse();
        }
        if let Some(max) = opts.max_count {
            slice.truncate(max);
        }
        Ok(slice)
    }

    pub(crate) fn read_all(&self, opts: ReadAllOptions) -> Vec<StoredEvent> {
        let from_position = opts.from_position.unwrap_or(1).max(1);
        let mut slice: Vec<StoredEvent> = self
            .global
            .iter()
            .filter(|e| e.global_position >= from_position)
            .map(|e| (**e).clone())
            .collect();

        if opts.direction == Direction::Backward {
            slice.reverse();
        }
        if let Some(max) = opts.max_count {
            slice.truncate(max);
        }
        slice
    }
}
