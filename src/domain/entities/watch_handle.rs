//! WatchHandle entity - pending notification state of one watched directory
//!
//! A handle is *armed* after registration. The first event turns it
//! *signalled* and places it on its service's `ReadyQueue`; later events
//! accumulate until a consumer calls `poll_events()` and `reset()`.
//! `reset()` re-arms the handle, or queues it again straight away when events
//! arrived in the meantime. Consumers that never reset stop receiving the
//! handle, although its events keep accumulating.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::domain::value_objects::{EventKind, PathEvent};
use crate::lock::lock;

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned when a directory is registered for notifications.
///
/// Cloning is cheap; clones refer to the same registration.
#[derive(Clone)]
pub struct WatchHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    id: u64,
    path: PathBuf,
    kinds: Vec<EventKind>,
    state: Mutex<HandleState>,
    ready: Weak<ReadyQueue>,
}

#[derive(Default)]
struct HandleState {
    events: Vec<PathEvent>,
    signalled: bool,
    cancelled: bool,
}

impl WatchHandle {
    /// Create an armed handle for `path` that reports `kinds` into `ready`.
    pub fn new(path: impl Into<PathBuf>, kinds: &[EventKind], ready: &Arc<ReadyQueue>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
                path: path.into(),
                kinds: kinds.to_vec(),
                state: Mutex::new(HandleState::default()),
                ready: Arc::downgrade(ready),
            }),
        }
    }

    /// The watched directory
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Event kinds this handle was registered for
    pub fn kinds(&self) -> &[EventKind] {
        &self.inner.kinds
    }

    /// Take every pending event, oldest first
    pub fn poll_events(&self) -> Vec<PathEvent> {
        std::mem::take(&mut lock(&self.inner.state).events)
    }

    /// Re-arm the handle so that further events are delivered.
    ///
    /// Returns `false` once the handle is no longer valid.
    pub fn reset(&self) -> bool {
        let requeue = {
            let mut state = lock(&self.inner.state);
            if !self.is_valid_locked(&state) {
                return false;
            }
            if state.events.is_empty() {
                state.signalled = false;
                false
            } else {
                state.signalled = true;
                true
            }
        };
        if requeue {
            self.enqueue();
        }
        true
    }

    /// Whether the registration is still live
    pub fn is_valid(&self) -> bool {
        let state = lock(&self.inner.state);
        self.is_valid_locked(&state)
    }

    /// Cancel the registration; pending events are discarded
    pub fn cancel(&self) {
        let mut state = lock(&self.inner.state);
        state.cancelled = true;
        state.events.clear();
    }

    /// Record an event. Kinds the handle was not registered for are ignored.
    ///
    /// Queues the handle on its ready queue when it transitions from armed to
    /// signalled. Returns whether the event was recorded.
    pub fn signal(&self, event: PathEvent) -> bool {
        if !self.inner.kinds.contains(&event.kind) {
            return false;
        }
        let became_ready = {
            let mut state = lock(&self.inner.state);
            if !self.is_valid_locked(&state) {
                return false;
            }
            state.events.push(event);
            !std::mem::replace(&mut state.signalled, true)
        };
        if became_ready {
            self.enqueue();
        }
        true
    }

    fn is_valid_locked(&self, state: &HandleState) -> bool {
        !state.cancelled && self.inner.ready.strong_count() > 0
    }

    fn enqueue(&self) {
        if let Some(ready) = self.inner.ready.upgrade() {
            ready.push(self.clone());
        }
    }
}

impl PartialEq for WatchHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for WatchHandle {}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("id", &self.inner.id)
            .field("path", &self.inner.path)
            .finish()
    }
}

/// FIFO of signalled handles plus a coalescing readiness signal.
///
/// The signal channel has a single slot: any number of pushes between two
/// receives leave exactly one token, so a waiter never misses readiness and
/// never accumulates a backlog of stale tokens.
pub struct ReadyQueue {
    queue: Mutex<VecDeque<WatchHandle>>,
    signal_tx: Sender<()>,
    signal_rx: Receiver<()>,
}

impl ReadyQueue {
    pub fn new() -> Arc<Self> {
        let (signal_tx, signal_rx) = crossbeam_channel::bounded(1);
        Arc::new(Self {
            queue: Mutex::new(VecDeque::new()),
            signal_tx,
            signal_rx,
        })
    }

    /// Queue a signalled handle and raise the readiness signal
    pub fn push(&self, handle: WatchHandle) {
        lock(&self.queue).push_back(handle);
        match self.signal_tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                log::trace!("readiness signal has no receiver");
            }
        }
    }

    /// Next ready handle, without blocking
    pub fn pop(&self) -> Option<WatchHandle> {
        lock(&self.queue).pop_front()
    }

    /// Receiver that yields a token whenever handles may be ready
    pub fn signal(&self) -> Receiver<()> {
        self.signal_rx.clone()
    }

    /// Drop every queued handle
    pub fn clear(&self) {
        lock(&self.queue).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.queue).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
