//! Domain Ports (Interfaces)
//!
//! These traits define the collaborators the watcher core is injected with.
//! Infrastructure layer provides concrete implementations.

pub mod executor;
pub mod notification_service;
pub mod tree_builder;

pub use executor::{Executor, Job};
pub use notification_service::NotificationService;
pub use tree_builder::TreeBuilder;
