//! Notification Service Implementations
//!
//! Concrete implementations of the NotificationService port.

mod notify_service;
mod translate;

pub use notify_service::NotifyService;
