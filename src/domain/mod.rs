//! Domain Layer
//!
//! Value types and the ports the watcher core is written against.
//!
//! ## Structure
//!
//! - `entities/` - Domain entities (PathElement tree, WatchHandle)
//! - `value_objects/` - Immutable value types (EventKind, PathEvent, CreateOptions)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Ports & Adapters** - OS notifications, callback delivery and tree
//!    enumeration all go through trait-defined ports
//! 2. **No global state** - every watcher owns its collaborators

pub mod entities;
pub mod ports;
pub mod value_objects;
