//! Thread-backed Executor
//!
//! Runs jobs one at a time, in submission order, on a dedicated named thread.
//! A panicking job is logged and does not take the thread down.

use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

use crate::domain::ports::{Executor, Job};
use crate::error::panic_message;

/// Default thread name for delivery threads
pub const DEFAULT_DELIVERY_THREAD_NAME: &str = "directory-watcher-events";

/// Single-threaded executor
#[derive(Debug)]
pub struct ThreadExecutor {
    sender: Option<Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadExecutor {
    /// Spawn a delivery thread with the default name
    pub fn new() -> io::Result<Self> {
        Self::named(DEFAULT_DELIVERY_THREAD_NAME)
    }

    /// Spawn a delivery thread with the given name
    pub fn named(name: impl Into<String>) -> io::Result<Self> {
        let name = name.into();
        if name.contains('\0') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "thread name must not contain NUL bytes",
            ));
        }
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let thread = thread::Builder::new().name(name).spawn(move || {
            for job in receiver {
                if let Err(payload) = catch_unwind(AssertUnwindSafe(job)) {
                    log::warn!("delivery job panicked: {}", panic_message(payload.as_ref()));
                }
            }
            log::trace!("delivery thread finished");
        })?;

        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
        })
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(job).is_err() {
            log::warn!("delivery thread is gone; job dropped");
        }
    }
}

impl Drop for ThreadExecutor {
    /// Runs the jobs already queued, then stops the thread.
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.thread.take() {
            // Dropped from one of its own jobs: the thread exits by itself
            if handle.thread().id() == thread::current().id() {
                return;
            }
            let _ = handle.join();
        }
    }
}
