//! Event kind value object - what happened to a directory entry
//!
//! - `Create`: an entry appeared in the watched directory
//! - `Delete`: an entry disappeared
//! - `Modify`: an entry's content or metadata changed

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of change reported for an entry of a watched directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Entry created (or renamed into the directory)
    Create,
    /// Entry deleted (or renamed out of the directory)
    Delete,
    /// Entry modified
    Modify,
}

/// Kinds registered when nothing else is configured.
pub const DEFAULT_EVENT_KINDS: [EventKind; 3] =
    [EventKind::Create, EventKind::Delete, EventKind::Modify];

impl EventKind {
    /// Stable lowercase name, as used in config files and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Delete => "delete",
            EventKind::Modify => "modify",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(EventKind::Create),
            "delete" => Ok(EventKind::Delete),
            "modify" => Ok(EventKind::Modify),
            other => Err(format!(
                "unknown event kind '{}' (expected create, delete or modify)",
                other
            )),
        }
    }
}

/// A single pending event of a watch handle.
///
/// `path` is relative to the watched directory (the entry's file name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PathEvent {
    pub kind: EventKind,
    pub path: PathBuf,
}

impl PathEvent {
    pub fn new(kind: EventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}
