use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dirwatch::{CreateOptions, WatcherConfig, WatcherError};

use super::start_watcher;

pub fn cmd_touch(file: &Path, mode: Option<u32>, config: &WatcherConfig, json: bool) -> Result<()> {
    let watcher = start_watcher(config)?;
    let (tx, rx) = crossbeam_channel::bounded(1);
    let err_tx = tx.clone();

    watcher.create_file(
        file,
        move |modified| {
            let _ = tx.send(Ok(modified));
        },
        move |err: WatcherError| {
            let _ = err_tx.send(Err(err));
        },
        options(mode),
    )?;
    let outcome = rx.recv().context("watcher stopped before creating the file")?;
    watcher.join();

    let modified: DateTime<Utc> = outcome?.into();
    if json {
        let output = serde_json::json!({
            "event": "created",
            "kind": "file",
            "path": file.display().to_string(),
            "modified": modified.to_rfc3339(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("created {} (modified {})", file.display(), modified.to_rfc3339());
    }
    Ok(())
}

pub fn cmd_mkdir(
    dir: &Path,
    parents: bool,
    mode: Option<u32>,
    config: &WatcherConfig,
    json: bool,
) -> Result<()> {
    let watcher = start_watcher(config)?;
    let (tx, rx) = crossbeam_channel::bounded(1);
    let err_tx = tx.clone();

    let on_success = move |path: PathBuf| {
        let _ = tx.send(Ok(path));
    };
    let on_error = move |err: WatcherError| {
        let _ = err_tx.send(Err(err));
    };
    if parents {
        watcher.create_directories(dir, on_success, on_error, options(mode))?;
    } else {
        watcher.create_directory(dir, on_success, on_error, options(mode))?;
    }
    let outcome = rx.recv().context("watcher stopped before creating the directory")?;
    watcher.join();

    let path = outcome?;
    if json {
        let output = serde_json::json!({
            "event": "created",
            "kind": "directory",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("created {}/", path.display());
    }
    Ok(())
}

fn options(mode: Option<u32>) -> CreateOptions {
    match mode {
        Some(mode) => CreateOptions::new().with_mode(mode),
        None => CreateOptions::new(),
    }
}
