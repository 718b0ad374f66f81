use std::path::PathBuf;

use anyhow::{Context, Result};
use dirwatch::{WatchEvent, WatcherConfig};

use super::{emit, start_watcher};

pub fn cmd_watch(dirs: &[PathBuf], config: &WatcherConfig, json: bool) -> Result<()> {
    let watcher = start_watcher(config)?;

    let _errors = watcher.errors_stream().subscribe(move |err| {
        emit(&WatchEvent::error(err.to_string()), json);
    });
    let _changes = watcher.signalled_handles_stream().subscribe(move |handle| {
        if !handle.is_valid() {
            emit(&WatchEvent::invalidated(handle.path()), json);
            return;
        }
        for event in handle.poll_events() {
            emit(&WatchEvent::change(handle.path(), &event), json);
        }
        handle.reset();
    });

    let mut watched = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let handle = watcher
            .watch(dir)
            .with_context(|| format!("cannot watch {}", dir.display()))?;
        watched.push(handle.path().to_path_buf());
    }

    // Set up Ctrl+C handler
    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })
    .context("failed to set Ctrl+C handler")?;

    emit(&WatchEvent::started(&watched), json);
    let _ = stop_rx.recv();

    emit(&WatchEvent::shutdown(), json);
    watcher.join();
    Ok(())
}
