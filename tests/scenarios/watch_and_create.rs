//! Watching a directory and creating entries in it through the watcher

use std::sync::Arc;

use dirwatch::{
    CreateOptions, DirectoryWatcher, EventKind, PathEvent, ThreadExecutor, WatchHandle,
};
use tempfile::tempdir;

use crate::common::*;

/// Subscribe a consumer that drains and re-arms every delivered handle
fn collect_events(
    watcher: &DirectoryWatcher,
) -> crossbeam_channel::Receiver<(WatchHandle, PathEvent)> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let _sub = watcher.signalled_handles_stream().subscribe(move |handle| {
        for event in handle.poll_events() {
            let _ = tx.send((handle.clone(), event));
        }
        handle.reset();
    });
    rx
}

fn wait_for(
    rx: &crossbeam_channel::Receiver<(WatchHandle, PathEvent)>,
    wanted: &PathEvent,
) -> Option<WatchHandle> {
    let deadline = std::time::Instant::now() + TIMEOUT;
    while let Some(left) = deadline.checked_duration_since(std::time::Instant::now()) {
        match rx.recv_timeout(left) {
            Ok((handle, event)) if &event == wanted => return Some(handle),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
    None
}

/// SCENARIO: watch a directory, create a file in it, see a Create event
#[test]
fn scenario_created_file_signals_watch_handle() {
    let dir = tempdir().unwrap();
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();
    let events = collect_events(&watcher);
    let handle = watcher.watch(dir.path()).unwrap();

    watcher
        .create_file(
            dir.path().join("x.txt"),
            |_| {},
            |e| panic!("create failed: {e}"),
            CreateOptions::new(),
        )
        .unwrap();

    let signalled = wait_for(&events, &PathEvent::new(EventKind::Create, "x.txt"))
        .expect("no Create event for x.txt");
    assert_eq!(signalled, handle);
    assert!(handle.is_valid());
    watcher.join();
}

/// SCENARIO: a re-armed handle keeps reporting later changes
#[test]
fn scenario_reset_handle_reports_following_changes() {
    let dir = tempdir().unwrap();
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();
    let events = collect_events(&watcher);
    watcher.watch(dir.path()).unwrap();

    std::fs::write(dir.path().join("one"), "").unwrap();
    assert!(wait_for(&events, &PathEvent::new(EventKind::Create, "one")).is_some());

    std::fs::remove_file(dir.path().join("one")).unwrap();
    assert!(wait_for(&events, &PathEvent::new(EventKind::Delete, "one")).is_some());
    watcher.join();
}

/// SCENARIO: deleting a watched directory invalidates its handle
#[test]
fn scenario_removed_directory_invalidates_handle() {
    let dir = tempdir().unwrap();
    let watched = dir.path().join("w");
    std::fs::create_dir(&watched).unwrap();
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();
    let handle = watcher.watch(&watched).unwrap();

    std::fs::remove_dir(&watched).unwrap();

    assert!(wait_until(|| !handle.is_valid()));
    assert!(!handle.reset());
    watcher.join();
}

/// SCENARIO: watching the same directory twice yields one registration
#[test]
fn scenario_double_watch_returns_same_handle() {
    let dir = tempdir().unwrap();
    let watcher = DirectoryWatcher::new(inline()).unwrap();

    let first = watcher.watch(dir.path()).unwrap();
    let second = watcher.watch(dir.path()).unwrap();

    assert_eq!(first, second);
    watcher.join();
}

/// SCENARIO: event kinds outside the configured set are not reported
#[test]
fn scenario_filtered_kinds_are_not_recorded() {
    let dir = tempdir().unwrap();
    let config = dirwatch::WatcherConfig::default().with_events(vec![EventKind::Delete]);
    let watcher = DirectoryWatcher::with_config(&config, inline()).unwrap();
    let events = collect_events(&watcher);
    watcher.watch(dir.path()).unwrap();

    std::fs::write(dir.path().join("f"), "").unwrap();
    std::fs::remove_file(dir.path().join("f")).unwrap();

    let (_, first) = events.recv_timeout(TIMEOUT).unwrap();
    assert_eq!(first, PathEvent::new(EventKind::Delete, "f"));
    watcher.join();
}

/// SCENARIO: renaming an entry reports one Delete and one Create
#[test]
fn scenario_rename_reports_each_half_once() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("old"), "").unwrap();
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();
    let events = collect_events(&watcher);
    watcher.watch(dir.path()).unwrap();

    std::fs::rename(dir.path().join("old"), dir.path().join("new")).unwrap();
    // Events of one directory arrive in order, so the marker closes the rename's batch
    std::fs::write(dir.path().join("marker"), "").unwrap();

    let marker = PathEvent::new(EventKind::Create, "marker");
    let mut seen = Vec::new();
    let mut found_marker = false;
    while let Ok((_, event)) = events.recv_timeout(TIMEOUT) {
        if event == marker {
            found_marker = true;
            break;
        }
        seen.push(event);
    }

    assert!(found_marker, "marker never reported; saw {:?}", seen);
    assert_eq!(
        seen,
        vec![
            PathEvent::new(EventKind::Delete, "old"),
            PathEvent::new(EventKind::Create, "new"),
        ]
    );
    watcher.join();
}

/// SCENARIO: moving a watched directory away invalidates its handle
#[test]
fn scenario_moved_directory_invalidates_handle() {
    let dir = tempdir().unwrap();
    let watched = dir.path().join("w");
    std::fs::create_dir(&watched).unwrap();
    let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap();
    let handle = watcher.watch(&watched).unwrap();

    let moved = dir.path().join("moved");
    std::fs::rename(&watched, &moved).unwrap();
    assert!(wait_until(|| !handle.is_valid()));

    // Later changes under the new name are not reported on the old handle
    std::fs::write(moved.join("late.txt"), "").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(200));
    assert!(handle.poll_events().is_empty());
    assert!(!handle.reset());
    watcher.join();
}
