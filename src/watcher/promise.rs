//! One-shot result handed from the IO thread to a waiting caller

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::error::{WatcherError, WatcherResult};

/// Pending result of an operation running on the IO thread
#[derive(Debug)]
pub struct Promise<T> {
    rx: Receiver<WatcherResult<T>>,
}

/// Completing side of a `Promise`
pub(crate) struct Completer<T> {
    tx: Sender<WatcherResult<T>>,
}

pub(crate) fn promise<T>() -> (Completer<T>, Promise<T>) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (Completer { tx }, Promise { rx })
}

impl<T> Completer<T> {
    pub(crate) fn complete(self, result: WatcherResult<T>) {
        // The caller may have dropped its promise
        let _ = self.tx.send(result);
    }
}

fn abandoned() -> WatcherError {
    WatcherError::UnhandledTask {
        message: "operation ended without producing a result".to_string(),
    }
}

impl<T> Promise<T> {
    /// Block until the result is available
    pub fn wait(self) -> WatcherResult<T> {
        self.rx.recv().unwrap_or_else(|_| Err(abandoned()))
    }

    /// Block for at most `timeout`; gives the promise back if it is still
    /// pending.
    pub fn wait_timeout(self, timeout: Duration) -> Result<WatcherResult<T>, Self> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Ok(result),
            Err(RecvTimeoutError::Timeout) => Err(self),
            Err(RecvTimeoutError::Disconnected) => Ok(Err(abandoned())),
        }
    }

    /// Take the result if it is ready; gives the promise back otherwise.
    pub fn try_take(self) -> Result<WatcherResult<T>, Self> {
        match self.rx.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(abandoned())),
        }
    }
}
