//! Domain Value Objects
//!
//! Immutable value types that describe watch events and creation options.

mod create_options;
mod event_kind;

pub use create_options::CreateOptions;
pub use event_kind::{EventKind, PathEvent, DEFAULT_EVENT_KINDS};
