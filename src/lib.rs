//! dirwatch - directory watching with a single IO thread
//!
//! A `DirectoryWatcher` owns one background thread that polls a notification
//! service for changed directories and runs file system mutations in
//! submission order. Results and notifications are delivered on an executor
//! supplied by the caller.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
mod lock;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, WatcherConfig};
pub use domain::entities::{PathElement, WatchHandle};
pub use domain::ports::{Executor, Job, NotificationService, TreeBuilder};
pub use domain::value_objects::{CreateOptions, EventKind, PathEvent};
pub use error::{WatcherError, WatcherResult};
pub use infrastructure::{FsTreeBuilder, NotifyService, ThreadExecutor};
pub use watcher::{DirectoryWatcher, DirectoryWatcherBuilder, EventStream, Promise, Subscription, WatchEvent};
