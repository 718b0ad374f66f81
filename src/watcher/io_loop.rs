//! The IO loop: the single thread that polls notifications and runs tasks
//!
//! Each iteration:
//! 1. a ready watch handle is published on the signalled-handles stream;
//! 2. otherwise, after shutdown, the queue is drained one last time, the
//!    notification service is closed and the loop ends;
//! 3. otherwise the task queue is drained until momentarily empty, and the
//!    thread blocks until the service signals readiness or a submitter
//!    wakes it, whichever comes first.
//!
//! Both signals are single-slot channels. A wake raised while the loop is
//! busy stays pending and makes the next wait return at once, so no wakeup
//! is lost, and nothing is ever delivered to the thread while it runs a task.

use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, Receiver};

use crate::domain::entities::WatchHandle;
use crate::domain::ports::NotificationService;
use crate::error::{panic_message, WatcherError};

use super::channel::EventChannel;
use super::task::{Task, TaskQueue};

/// What the loop does next
#[derive(Debug)]
enum Step {
    DeliverHandle(WatchHandle),
    DrainTasks,
    Close,
}

pub(crate) struct IoLoop {
    pub(crate) service: Arc<dyn NotificationService>,
    pub(crate) queue: Arc<TaskQueue>,
    pub(crate) errors: EventChannel<Arc<WatcherError>>,
    pub(crate) signalled: EventChannel<WatchHandle>,
}

impl IoLoop {
    pub(crate) fn spawn(self, thread_name: &str) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || self.run())
    }

    fn run(self) {
        log::debug!("IO loop started");
        let mut ready = self.service.ready_signal();
        let wake = self.queue.wake_signal();

        loop {
            match self.next_step() {
                Step::DeliverHandle(handle) => {
                    log::trace!("handle ready: {}", handle.path().display());
                    self.signalled.push(handle);
                }
                Step::Close => {
                    self.close();
                    break;
                }
                Step::DrainTasks => {
                    self.drain();
                    if self.wait(&ready, &wake) {
                        log::debug!("notification service dropped its readiness signal");
                        ready = crossbeam_channel::never();
                    }
                }
            }
        }
        log::debug!("IO loop finished");
    }

    fn next_step(&self) -> Step {
        if let Some(handle) = self.service.poll() {
            Step::DeliverHandle(handle)
        } else if self.queue.is_shutdown() {
            Step::Close
        } else {
            Step::DrainTasks
        }
    }

    /// Run queued tasks until the queue is momentarily empty
    fn drain(&self) {
        while let Some(task) = self.queue.pop() {
            self.run_task(task);
        }
    }

    fn run_task(&self, task: Task) {
        let label = task.label();
        log::trace!("running {} task", label);
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| task.run())) {
            let message = panic_message(payload.as_ref());
            log::debug!("{} task panicked: {}", label, message);
            self.errors
                .push(Arc::new(WatcherError::UnhandledTask { message }));
        }
    }

    /// Block until readiness or a wake, whichever comes first.
    ///
    /// Returns `true` when the readiness channel is disconnected.
    fn wait(&self, ready: &Receiver<()>, wake: &Receiver<()>) -> bool {
        select! {
            recv(ready) -> msg => msg.is_err(),
            recv(wake) -> _ => false,
        }
    }

    fn close(&self) {
        // Tasks accepted before shutdown still run
        self.drain();
        if let Err(source) = self.service.close() {
            log::debug!("closing notification service failed: {}", source);
            self.errors.push(Arc::new(WatcherError::Close { source }));
        }
    }
}
