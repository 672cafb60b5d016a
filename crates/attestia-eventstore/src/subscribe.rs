use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Mutex;

use attestia_core::StoredEvent;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Default bounded capacity for a subscriber's delivery channel. Chosen to
/// absorb a burst of appends without unbounded memory growth; a full
/// channel causes the delivery to be dropped and logged rather than
/// retried, per the design notes.
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 1024;

pub struct SubscriptionHandle {
    pub(crate) id: u64,
}

struct Subscriber {
    id: u64,
    stream_id: Option<String>,
    sender: SyncSender<StoredEvent>,
}

#[derive(Default)]
pub(crate) struct SubscriptionHub {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SubscriptionHub {
    pub(crate) fn subscribe_stream(&self, stream_id: &str) -> (SubscriptionHandle, Receiver<StoredEvent>) {
        self.add(Some(stream_id.to_string()))
    }

    pub(crate) fn subscribe_all(&self) -> (SubscriptionHandle, Receiver<StoredEvent>) {
        self.add(None)
    }

    fn add(&self, stream_id: Option<String>) -> (SubscriptionHandle, Receiver<StoredEvent>) {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = sync_channel(DEFAULT_SUBSCRIBER_CAPACITY);
        self.subscribers.lock().unwrap().push(Subscriber {
            id,
            stream_id,
            sender: tx,
        });
        (SubscriptionHandle { id }, rx)
    }

    pub(crate) fn unsubscribe(&self, handle: &SubscriptionHandle) {
        self.subscribers.lock().unwrap().retain(|s| s.id != handle.id);
    }

    /// Delivers `event` to every matching subscriber. Called only after the
    /// append is durable. A full channel is logged and skipped: dropped
    /// deliveries must never corrupt ordering for the handler.
    pub(crate) fn notify(&self, event: &StoredEvent) {
        let subscribers = self.subscribers.lock().unwrap();
        for sub in subscribers.iter() {
            let matches = match &sub.stream_id {
                Some(s) => s == &event.stream_id,
                None => true,
            };
            if matches {
                if sub.sender.try_send(event.clone()).is_err() {
                    tracing::warn!(
                        subscription_id = sub.id,
                        stream_id = %event.stream_id,
                        "dropped event delivery to subscriber: channel full or closed"
                    );
                }
            }
        }
    }
}
