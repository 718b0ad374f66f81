//! Executor Implementations
//!
//! Concrete implementations of the Executor port.

mod thread;

pub use thread::{ThreadExecutor, DEFAULT_DELIVERY_THREAD_NAME};
