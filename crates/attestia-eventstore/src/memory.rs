use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

use attestia_core::{AttestiaError, DomainEvent, StoredEvent};

use crate::core::StoreCore;
use crate::subscribe::{SubscriptionHandle, SubscriptionHub};
use crate::types::{AppendOptions, AppendResult, ReadAllOptions, ReadOptions, VerifyResult};

/// Pure in-memory event store: a `streamId -> ordered list` map plus a
/// global ordered list, per the core specification's persistence form (a).
pub struct InMemoryEventStore {
    core: Mutex<StoreCore>,
    hub: SubscriptionHub,
    closed: AtomicBool,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            core: Mutex::new(StoreCore::default()),
            hub: SubscriptionHub::default(),
            closed: AtomicBool::new(false),
        }
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
        let last_events: Vec<StoredEvent> = staged.clone();
        let result = core.commit(staged);
        drop(core);
        for event in &last_events {
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

pub fn verify_hash_chain(events: &[StoredEvent]) -> VerifyResult {
    crate::chain::verify_hash_chain(events)
}
