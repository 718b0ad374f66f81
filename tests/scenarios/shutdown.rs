//! Shutdown workflows

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dirwatch::{CreateOptions, DirectoryWatcher, ThreadExecutor};
use tempfile::tempdir;

use crate::common::*;

/// SCENARIO: shutting down twice is harmless
#[test]
fn scenario_double_shutdown() {
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();

    watcher.shutdown();
    watcher.shutdown();

    assert!(watcher.is_shutdown());
    watcher.join();
}

/// SCENARIO: work accepted before shutdown still completes
#[test]
fn scenario_pending_work_finishes_after_shutdown() {
    let dir = tempdir().unwrap();
    let executor = RecordingExecutor::new();
    let watcher = DirectoryWatcher::new(executor.clone()).unwrap();
    let done = Arc::new(AtomicUsize::new(0));

    for i in 0..10 {
        let done = done.clone();
        watcher
            .create_directory(
                dir.path().join(i.to_string()),
                move |_| {
                    done.fetch_add(1, Ordering::SeqCst);
                },
                |e| panic!("unexpected failure: {e}"),
                CreateOptions::new(),
            )
            .unwrap();
    }
    watcher.shutdown();
    watcher.join();
    executor.run_all();

    assert_eq!(done.load(Ordering::SeqCst), 10);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 10);
}

/// SCENARIO: a watched directory stops reporting once the watcher is gone
#[test]
fn scenario_handles_invalid_after_shutdown() {
    let dir = tempdir().unwrap();
    let watcher = DirectoryWatcher::new(inline()).unwrap();
    let handle = watcher.watch(dir.path()).unwrap();
    assert!(handle.is_valid());

    watcher.join();

    assert!(!handle.is_valid());
    assert!(!handle.reset());
}

/// SCENARIO: dropping the watcher without joining lets the IO thread exit
#[test]
fn scenario_drop_without_join() {
    let dir = tempdir().unwrap();
    let ran = Arc::new(AtomicUsize::new(0));
    {
        let watcher = DirectoryWatcher::new(inline()).unwrap();
        let ran = ran.clone();
        watcher
            .create_directory(
                dir.path().join("made"),
                move |_| {
                    ran.fetch_add(1, Ordering::SeqCst);
                },
                |_| {},
                CreateOptions::new(),
            )
            .unwrap();
    }

    assert!(wait_until(|| ran.load(Ordering::SeqCst) == 1));
    assert!(dir.path().join("made").is_dir());
}
