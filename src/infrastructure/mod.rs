//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all OS-facing I/O.
//!
//! ## Structure
//!
//! - `notification/` - `notify`-backed NotificationService
//! - `executor/` - Thread-backed Executor
//! - `fs/` - File system tree builder

pub mod executor;
pub mod fs;
pub mod notification;

// Re-export for convenience
pub use executor::ThreadExecutor;
pub use fs::FsTreeBuilder;
pub use notification::NotifyService;
