//! Error types for dirwatch
//!
//! Uses `thiserror` for library errors. Operation-scoped errors
//! (`Mutation`, `Enumeration`) reach the caller that issued the operation;
//! loop-scoped errors (`Close`, `UnhandledTask`) only reach the error stream.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for watcher operations
pub type WatcherResult<T> = Result<T, WatcherError>;

/// Main error type for watcher operations
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Directory could not be registered with the notification service
    #[error("cannot watch {path}: {source}")]
    Registration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory creation failed
    #[error("cannot create {path}: {source}")]
    Mutation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory tree could not be enumerated
    #[error("cannot enumerate {root}: {source}")]
    Enumeration {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Work was submitted after `shutdown()`
    #[error("directory watcher is shut down")]
    Rejected,

    /// Notification service failed to close during shutdown
    #[error("failed to close notification service: {source}")]
    Close {
        #[source]
        source: std::io::Error,
    },

    /// A queued task panicked outside its own failure path
    #[error("task panicked on the IO thread: {message}")]
    UnhandledTask { message: String },

    /// Watcher could not be started
    #[error("failed to start directory watcher: {source}")]
    Init {
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file
    #[error("invalid config in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatcherError {
    /// Returns the underlying I/O error kind, when there is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            WatcherError::Registration { source, .. }
            | WatcherError::Mutation { source, .. }
            | WatcherError::Enumeration { source, .. }
            | WatcherError::Close { source }
            | WatcherError::Init { source } => Some(source.kind()),
            WatcherError::Io(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Whether this error was produced by submitting work after shutdown.
    pub fn is_rejected(&self) -> bool {
        matches!(self, WatcherError::Rejected)
    }
}

/// Render a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
