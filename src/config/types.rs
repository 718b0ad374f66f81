//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EventKind, DEFAULT_EVENT_KINDS};
use crate::error::{WatcherError, WatcherResult};
use crate::infrastructure::executor::DEFAULT_DELIVERY_THREAD_NAME;

use super::loader::{self, ConfigWarning};

/// Origin reported for configuration built in code rather than loaded
pub(crate) const IN_MEMORY_ORIGIN: &str = "<memory>";

/// Default name of the IO thread
pub const DEFAULT_IO_THREAD_NAME: &str = "directory-watcher-io";

/// Watcher settings (`[watcher]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Name given to the IO thread
    #[serde(default = "default_io_thread_name")]
    pub io_thread_name: String,

    /// Name given to the delivery thread of `ThreadExecutor`
    #[serde(default = "default_delivery_thread_name")]
    pub delivery_thread_name: String,

    /// Event kinds registered by `watch`
    #[serde(default = "default_events")]
    pub events: Vec<EventKind>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            io_thread_name: default_io_thread_name(),
            delivery_thread_name: default_delivery_thread_name(),
            events: default_events(),
        }
    }
}

fn default_io_thread_name() -> String {
    DEFAULT_IO_THREAD_NAME.to_string()
}

fn default_delivery_thread_name() -> String {
    DEFAULT_DELIVERY_THREAD_NAME.to_string()
}

fn default_events() -> Vec<EventKind> {
    DEFAULT_EVENT_KINDS.to_vec()
}

impl WatcherConfig {
    /// Set the event kinds
    pub fn with_events(mut self, events: Vec<EventKind>) -> Self {
        self.events = events;
        self
    }

    /// Set the IO thread name
    pub fn with_io_thread_name(mut self, name: impl Into<String>) -> Self {
        self.io_thread_name = name.into();
        self
    }

    /// Event kinds with duplicates removed, in first-seen order
    pub fn event_kinds(&self) -> Vec<EventKind> {
        let mut kinds = Vec::with_capacity(self.events.len());
        for kind in &self.events {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }

    /// Reject settings the watcher cannot run with
    pub fn validate(&self, origin: &Path) -> WatcherResult<()> {
        if self.events.is_empty() {
            return Err(WatcherError::Config {
                path: origin.to_path_buf(),
                message: "watcher.events must name at least one event kind".to_string(),
            });
        }
        for (key, name) in [
            ("io_thread_name", &self.io_thread_name),
            ("delivery_thread_name", &self.delivery_thread_name),
        ] {
            if name.trim().is_empty() {
                return Err(WatcherError::Config {
                    path: origin.to_path_buf(),
                    message: format!("watcher.{} must not be empty", key),
                });
            }
            if name.contains('\0') {
                return Err(WatcherError::Config {
                    path: origin.to_path_buf(),
                    message: format!("watcher.{} must not contain NUL bytes", key),
                });
            }
        }
        Ok(())
    }
}

/// Root of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watcher: WatcherConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> WatcherResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WatcherResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> WatcherResult<String> {
        toml::to_string_pretty(self).map_err(|e| WatcherError::Config {
            path: Path::new(IN_MEMORY_ORIGIN).to_path_buf(),
            message: e.to_string(),
        })
    }
}
