//! Domain Entities
//!
//! - `PathElement`: a node of an enumerated directory tree
//! - `WatchHandle`: pending notification state of one watched directory
//! - `ReadyQueue`: handles that have been signalled and await delivery

mod path_element;
mod watch_handle;

pub use path_element::PathElement;
pub use watch_handle::{ReadyQueue, WatchHandle};
