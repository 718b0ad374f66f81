//! `notify`-backed Notification Service
//!
//! One `RecommendedWatcher` serves every registered directory. Its callback
//! runs on notify's internal thread and routes each event to the handle of
//! the entry's parent directory, which queues itself on the shared
//! `ReadyQueue` when it becomes signalled.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crossbeam_channel::Receiver;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::entities::{ReadyQueue, WatchHandle};
use crate::domain::ports::NotificationService;
use crate::domain::value_objects::{EventKind, PathEvent};
use crate::lock::lock;

use super::translate::translate;

/// Notification service using the platform's recommended `notify` backend
/// (inotify, FSEvents/kqueue, ReadDirectoryChangesW).
pub struct NotifyService {
    shared: Arc<Shared>,
    /// `None` once closed. Also serializes registrations.
    watcher: Mutex<Option<RecommendedWatcher>>,
}

struct Shared {
    ready: Arc<ReadyQueue>,
    /// Registered directories, keyed by canonical path
    handles: Mutex<HashMap<PathBuf, WatchHandle>>,
}

impl NotifyService {
    pub fn new() -> io::Result<Self> {
        let shared = Arc::new(Shared {
            ready: ReadyQueue::new(),
            handles: Mutex::new(HashMap::new()),
        });

        let callback_shared = shared.clone();
        let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => callback_shared.dispatch(&event),
                Err(err) => log::warn!("notification backend error: {}", err),
            }
        })
        .map_err(notify_error_to_io)?;

        Ok(Self {
            shared,
            watcher: Mutex::new(Some(watcher)),
        })
    }

    /// Number of live registrations
    pub fn registered(&self) -> usize {
        lock(&self.shared.handles).len()
    }
}

impl Shared {
    fn dispatch(&self, event: &notify::Event) {
        for (kind, path) in translate(event) {
            // The watched directory itself went away
            if kind == EventKind::Delete {
                let removed = lock(&self.handles).remove(&path);
                if let Some(handle) = removed {
                    log::debug!("watched directory removed: {}", path.display());
                    handle.cancel();
                    self.ready.push(handle);
                }
            }

            let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
                continue;
            };
            let handle = lock(&self.handles).get(parent).cloned();
            if let Some(handle) = handle {
                log::trace!("{} {}", kind, path.display());
                handle.signal(PathEvent::new(kind, name));
            }
        }
    }
}

impl NotificationService for NotifyService {
    fn register(&self, dir: &Path, kinds: &[EventKind]) -> io::Result<WatchHandle> {
        let metadata = std::fs::metadata(dir)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            ));
        }
        let canonical = dir.canonicalize()?;

        let mut guard = lock(&self.watcher);
        let watcher = guard
            .as_mut()
            .ok_or_else(|| io::Error::other("notification service is closed"))?;

        if let Some(existing) = lock(&self.shared.handles).get(&canonical) {
            if existing.is_valid() {
                return Ok(existing.clone());
            }
        }

        // The handles lock must not be held here: the backend may wait on
        // its own thread, which takes that lock while dispatching.
        watcher
            .watch(&canonical, RecursiveMode::NonRecursive)
            .map_err(notify_error_to_io)?;

        let handle = WatchHandle::new(canonical.clone(), kinds, &self.shared.ready);
        lock(&self.shared.handles).insert(canonical.clone(), handle.clone());
        log::debug!("registered {} for {:?}", canonical.display(), kinds);
        Ok(handle)
    }

    fn poll(&self) -> Option<WatchHandle> {
        self.shared.ready.pop()
    }

    fn ready_signal(&self) -> Receiver<()> {
        self.shared.ready.signal()
    }

    fn close(&self) -> io::Result<()> {
        let Some(mut watcher) = lock(&self.watcher).take() else {
            return Ok(());
        };

        let handles: Vec<(PathBuf, WatchHandle)> = lock(&self.shared.handles).drain().collect();
        let mut first_error = None;
        for (path, handle) in handles {
            handle.cancel();
            match watcher.unwatch(&path) {
                Ok(()) => {}
                // The backend already dropped watches of deleted directories
                Err(err) if matches!(err.kind, notify::ErrorKind::WatchNotFound) => {}
                Err(err) => {
                    log::debug!("unwatch {} failed: {}", path.display(), err);
                    first_error.get_or_insert(notify_error_to_io(err));
                }
            }
        }
        drop(watcher);
        self.shared.ready.clear();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn notify_error_to_io(err: notify::Error) -> io::Error {
    let message = err.to_string();
    match err.kind {
        notify::ErrorKind::Io(io_err) => io_err,
        notify::ErrorKind::PathNotFound => io::Error::new(io::ErrorKind::NotFound, message),
        _ => io::Error::other(message),
    }
}
