//! Watch event lines for NDJSON output

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{EventKind, PathEvent};

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        directories: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    Change {
        kind: EventKind,
        directory: String,
        path: String,
        timestamp: DateTime<Utc>,
    },
    /// A watched directory went away; its handle is no longer valid
    Invalidated {
        directory: String,
        timestamp: DateTime<Utc>,
    },
    Error {
        message: String,
        timestamp: DateTime<Utc>,
    },
    Shutdown {
        timestamp: DateTime<Utc>,
    },
}

impl WatchEvent {
    pub fn started(directories: &[std::path::PathBuf]) -> Self {
        Self::WatchStarted {
            directories: directories
                .iter()
                .map(|d| d.display().to_string())
                .collect(),
            timestamp: Utc::now(),
        }
    }

    pub fn change(directory: &std::path::Path, event: &PathEvent) -> Self {
        Self::Change {
            kind: event.kind,
            directory: directory.display().to_string(),
            path: event.path.display().to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn invalidated(directory: &std::path::Path) -> Self {
        Self::Invalidated {
            directory: directory.display().to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn shutdown() -> Self {
        Self::Shutdown {
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line human readable form
    pub fn to_text(&self) -> String {
        match self {
            Self::WatchStarted { directories, .. } => {
                format!("watching {}", directories.join(", "))
            }
            Self::Change {
                kind,
                directory,
                path,
                ..
            } => format!("{:<6} {}/{}", kind.as_str(), directory, path),
            Self::Invalidated { directory, .. } => format!("gone   {}", directory),
            Self::Error { message, .. } => format!("error: {}", message),
            Self::Shutdown { .. } => "stopped".to_string(),
        }
    }
}
