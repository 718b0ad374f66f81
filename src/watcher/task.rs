//! Tasks and the task queue drained by the IO thread

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::domain::ports::Executor;
use crate::error::{panic_message, WatcherError, WatcherResult};
use crate::lock::lock;

/// A unit of work executed once on the IO thread
pub(crate) struct Task {
    label: &'static str,
    run: Box<dyn FnOnce() + Send>,
}

impl Task {
    /// A bare job. Panics escape to the IO loop, which reports them on the
    /// error stream.
    pub(crate) fn new(label: &'static str, run: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label,
            run: Box::new(run),
        }
    }

    /// An operation with success and failure continuations.
    ///
    /// Exactly one continuation is handed to `executor`. A panic inside
    /// `operation` is captured and delivered to `on_error`.
    pub(crate) fn with_continuations<T, Op, S, E>(
        label: &'static str,
        operation: Op,
        on_success: S,
        on_error: E,
        executor: Arc<dyn Executor>,
    ) -> Self
    where
        T: Send + 'static,
        Op: FnOnce() -> WatcherResult<T> + Send + 'static,
        S: FnOnce(T) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        Self::new(label, move || {
            let outcome = catch_unwind(AssertUnwindSafe(operation)).unwrap_or_else(|payload| {
                Err(WatcherError::UnhandledTask {
                    message: panic_message(payload.as_ref()),
                })
            });
            match outcome {
                Ok(value) => executor.execute(Box::new(move || on_success(value))),
                Err(err) => executor.execute(Box::new(move || on_error(err))),
            }
        })
    }

    pub(crate) fn label(&self) -> &'static str {
        self.label
    }

    pub(crate) fn run(self) {
        (self.run)()
    }
}

struct QueueState {
    shutdown: bool,
    tasks: VecDeque<Task>,
}

/// Unbounded FIFO of tasks plus the watcher's shutdown flag.
///
/// Both live under one mutex: a task is either accepted before shutdown (and
/// will run) or rejected, never both.
pub(crate) struct TaskQueue {
    state: Mutex<QueueState>,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        let (wake_tx, wake_rx) = crossbeam_channel::bounded(1);
        Self {
            state: Mutex::new(QueueState {
                shutdown: false,
                tasks: VecDeque::new(),
            }),
            wake_tx,
            wake_rx,
        }
    }

    /// Append `task` and wake the IO thread. Fails after shutdown.
    pub(crate) fn enqueue(&self, task: Task) -> WatcherResult<()> {
        {
            let mut state = lock(&self.state);
            if state.shutdown {
                return Err(WatcherError::Rejected);
            }
            log::trace!("queued {} task", task.label());
            state.tasks.push_back(task);
        }
        self.wake();
        Ok(())
    }

    /// Oldest queued task
    pub(crate) fn pop(&self) -> Option<Task> {
        lock(&self.state).tasks.pop_front()
    }

    /// Stop accepting tasks and wake the IO thread.
    ///
    /// Returns `true` for the call that actually flipped the flag.
    pub(crate) fn shutdown(&self) -> bool {
        let first = {
            let mut state = lock(&self.state);
            let first = !state.shutdown;
            state.shutdown = true;
            first
        };
        self.wake();
        first
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        lock(&self.state).shutdown
    }

    /// Raise the wake signal. Signals coalesce into a single pending token,
    /// so a wake sent while the IO thread is busy is seen by its next wait.
    pub(crate) fn wake(&self) {
        let _ = self.wake_tx.try_send(());
    }

    pub(crate) fn wake_signal(&self) -> Receiver<()> {
        self.wake_rx.clone()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.state).tasks.len()
    }
}
