//! NotificationService port - OS-level change notifications
//!
//! Registration happens on caller threads; polling and closing happen on the
//! watcher's IO thread. Implementations therefore synchronize internally.

use std::path::Path;

use crossbeam_channel::Receiver;

use crate::domain::entities::WatchHandle;
use crate::domain::value_objects::EventKind;

/// Source of ready watch handles
///
/// Implementations:
/// - `NotifyService` - backed by the `notify` crate
/// - test doubles driven by hand
pub trait NotificationService: Send + Sync + 'static {
    /// Register `dir` for the given event kinds.
    ///
    /// Registering the same directory again returns the existing handle.
    fn register(&self, dir: &Path, kinds: &[EventKind]) -> std::io::Result<WatchHandle>;

    /// Next ready handle, without blocking
    fn poll(&self) -> Option<WatchHandle>;

    /// Receiver that yields a token whenever `poll` may return a handle.
    ///
    /// Tokens may be spurious; a caller that sees one must re-poll.
    fn ready_signal(&self) -> Receiver<()>;

    /// Stop delivering notifications and invalidate every handle.
    fn close(&self) -> std::io::Result<()>;
}
