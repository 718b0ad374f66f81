//! Directory watcher with a single IO thread
//!
//! - One dedicated thread polls the notification service and runs queued
//!   file system tasks, in submission order
//! - Results, signalled handles and errors are delivered on the caller's
//!   executor
//! - Shutdown rejects new work, runs what was already accepted and closes
//!   the notification service

mod channel;
mod directory_watcher;
mod event;
mod io_loop;
mod promise;
mod task;

pub use channel::{EventStream, Subscription};
pub use directory_watcher::{DirectoryWatcher, DirectoryWatcherBuilder};
pub use event::WatchEvent;
pub use promise::Promise;
