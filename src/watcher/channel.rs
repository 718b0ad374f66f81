//! Broadcast event channels
//!
//! An `EventChannel` is an observer list whose `push` hands one delivery job
//! to the watcher's executor. The job calls every subscriber registered at
//! delivery time. Nothing is buffered: a value pushed while nobody is
//! subscribed is dropped.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::domain::ports::Executor;
use crate::error::panic_message;
use crate::lock::lock;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscribers<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T> Subscribers<T> {
    fn snapshot(&self) -> Vec<Callback<T>> {
        lock(&self.entries)
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect()
    }

    fn remove(&self, id: u64) {
        lock(&self.entries).retain(|(entry_id, _)| *entry_id != id);
    }
}

/// Publishing side, owned by the watcher
pub(crate) struct EventChannel<T> {
    name: &'static str,
    subscribers: Arc<Subscribers<T>>,
    executor: Arc<dyn Executor>,
}

impl<T: Send + Sync + 'static> EventChannel<T> {
    pub(crate) fn new(name: &'static str, executor: Arc<dyn Executor>) -> Self {
        Self {
            name,
            subscribers: Arc::new(Subscribers {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
            executor,
        }
    }

    /// Deliver `value` to every subscriber through the executor
    pub(crate) fn push(&self, value: T) {
        let subscribers = self.subscribers.clone();
        let name = self.name;
        self.executor.execute(Box::new(move || {
            for callback in subscribers.snapshot() {
                if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(&value))) {
                    log::warn!(
                        "{} subscriber panicked: {}",
                        name,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }));
    }

    /// Subscribable view for callers
    pub(crate) fn stream(&self) -> EventStream<T> {
        EventStream {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            subscribers: self.subscribers.clone(),
            executor: self.executor.clone(),
        }
    }
}

/// Subscribable view of one of a watcher's event channels
pub struct EventStream<T> {
    subscribers: Arc<Subscribers<T>>,
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> EventStream<T> {
    /// Register `callback`; it is invoked once for every value pushed while
    /// it stays subscribed, on the watcher's executor.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.subscribers.entries).push((id, Arc::new(callback)));

        let subscribers: Weak<Subscribers<T>> = Arc::downgrade(&self.subscribers);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(subscribers) = subscribers.upgrade() {
                    subscribers.remove(id);
                }
            })),
        }
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers.entries).len()
    }
}

/// De-registration handle returned by `EventStream::subscribe`.
///
/// Dropping it keeps the subscription alive; call `unsubscribe` to end it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Stop receiving values. Deliveries already handed to the executor may
    /// still reach the callback.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
