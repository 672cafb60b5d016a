use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

use attestia_core::{canonical_json, AttestiaError, DomainEvent, StoredEvent};

use crate::core::StoreCore;
use crate::subscribe::{SubscriptionHandle, SubscriptionHub};
use crate::types::{AppendOptions, AppendResult, ReadAllOptions, ReadOptions};

/// Append-only line-delimited JSON event store: persistence form (b). Each
/// line is the canonical JSON of a `StoredEvent`. The file is never
/// rewritten or compacted; corrupt or empty lines are skipped on read and
/// new appends always chain from the last successfully-parsed event.
pub struct FileEventStore {
    path: PathBuf,
    file: Mutex<File>,
    core: Mutex<StoreCore>,
    hub: SubscriptionHub,
    closed: AtomicBool,
}

impl FileEventStore {
    /// Opens (creating if absent) the JSONL file at `path`, replaying any
    /// existing contents to rebuild the in-memory index.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AttestiaError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AttestiaError::Storage(format!("creating parent dir: {e}")))?;
        }

        let events = if path.exists() {
            Self::load_events(&path)?
        } else {
            Vec::new()
        };

        let mut core = StoreCore::default();
        core.reindex(events);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| AttestiaError::Storage(format!("opening event file: {e}")))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            core: Mutex::new(core),
            hub: SubscriptionHub::default(),
            closed: AtomicBool::new(false),
        })
    }

    fn load_events(path: &Path) -> Result<Vec<StoredEvent>, AttestiaError> {
        let file = File::open(path).map_err(|e| AttestiaError::Storage(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => continue,
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredEvent>(&line) {
                Ok(event) => events.push(event),
                Err(_) => {
                    tracing::warn!(path = %path.display(), "skipping unparseable event line");
                    continue;
                }
            }
        }
        Ok(events)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn append(
        &self,
        stream_id: &str,
        events: &[DomainEvent],
        opts: AppendOptions,
    ) -> Result<AppendResult, AttestiaError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AttestiaError::StateTransition("StoreClosed".into()));
        }
        let mut core = self.core.lock().unwrap();
        let staged = core.stage_append(stream_id, events, opts)?;

        {
            let mut file = self.file.lock().unwrap();
            for event in &staged {
                let line = canonical_json(event);
                writeln!(file, "{line}")
                    .map_err(|e| AttestiaError::Storage(format!("writing event line: {e}")))?;
            }
            file.flush()
                .map_err(|e| AttestiaError::Storage(format!("flushing event file: {e}")))?;
        }

        let committed = staged.clone();
        let result = core.commit(staged);
        drop(core);
        for event in &committed {
            self.hub.notify(event);
        }
        Ok(result)
    }

    pub fn read(&self, stream_id: &str, opts: ReadOptions) -> Result<Vec<StoredEvent>, AttestiaError> {
        self.core.lock().unwrap().read(stream_id, opts)
    }

    pub fn read_all(&self, opts: ReadAllOptions) -> Vec<StoredEvent> {
        self.core.lock().unwrap().read_all(opts)
    }

    pub fn subscribe(&self, stream_id: &str) -> (SubscriptionHandle, Receiver<StoredEvent>) {
        self.hub.subscribe_stream(stream_id)
    }

    pub fn subscribe_all(&self) -> (SubscriptionHandle, Receiver<StoredEvent>) {
        self.hub.subscribe_all()
    }

    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        self.hub.unsubscribe(handle)
    }

    pub fn stream_exists(&self, stream_id: &str) -> bool {
        self.core.lock().unwrap().stream_exists(stream_id)
    }

    pub fn stream_version(&self, stream_id: &str) -> u64 {
        self.core.lock().unwrap().stream_version(stream_id)
    }

    pub fn global_position(&self) -> u64 {
        self.core.lock().unwrap().global_position()
    }
}
