//! Configuration module for dirwatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DIRWATCH_*)
//! 3. Explicit config file (`--config`)
//! 4. User config (~/.config/dirwatch/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, user_config_path, with_env_overrides, ConfigWarning};
pub use types::{Config, WatcherConfig, DEFAULT_IO_THREAD_NAME};
pub(crate) use types::IN_MEMORY_ORIGIN;
