pub mod create;
pub mod tree;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dirwatch::config::{load_or_default, WatcherConfig};
use dirwatch::{DirectoryWatcher, ThreadExecutor, WatchEvent};

/// Resolve configuration for this run. Unknown keys only warn.
pub fn load_config(explicit: Option<&Path>, json: bool) -> Result<WatcherConfig> {
    let (config, warnings) = load_or_default(explicit).context("failed to load configuration")?;
    for warning in &warnings {
        if json {
            log::warn!("{}", warning);
        } else {
            eprintln!("warning: {}", warning);
        }
    }
    Ok(config.watcher)
}

/// Watcher whose callbacks run on a dedicated delivery thread
pub(crate) fn start_watcher(config: &WatcherConfig) -> Result<DirectoryWatcher> {
    let executor = ThreadExecutor::named(config.delivery_thread_name.clone())
        .context("failed to start delivery thread")?;
    DirectoryWatcher::with_config(config, Arc::new(executor)).context("failed to start watcher")
}

/// Print one event as NDJSON or text
pub(crate) fn emit(event: &WatchEvent, json: bool) {
    if json {
        println!("{}", event.to_json());
    } else if matches!(event, WatchEvent::Error { .. }) {
        eprintln!("{}", event.to_text());
    } else {
        println!("{}", event.to_text());
    }
}
