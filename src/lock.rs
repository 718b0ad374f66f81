//! Mutex helper shared by the watcher internals.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the guard if a panicking holder poisoned it.
///
/// Every structure guarded this way stays consistent across a panic
/// (plain queues, flags and subscriber lists), so the data is still usable.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
