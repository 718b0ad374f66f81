//! Many threads queueing mutations at once

use std::sync::{Arc, Barrier, Mutex};

use dirwatch::{CreateOptions, DirectoryWatcher, ThreadExecutor, WatcherError};
use tempfile::tempdir;

use crate::common::*;

const THREADS: usize = 10;
const PER_THREAD: usize = 10;

/// SCENARIO: 100 create_directory calls from 10 threads under a missing
/// parent produce 100 failure deliveries, each exactly once.
#[test]
fn scenario_concurrent_create_directory_delivers_each_once() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-parent");
    let watcher = Arc::new(
        DirectoryWatcher::new(Arc::new(ThreadExecutor::new().unwrap())).unwrap(),
    );
    let delivered: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let watcher = watcher.clone();
            let delivered = delivered.clone();
            let barrier = barrier.clone();
            let missing = missing.clone();
            std::thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let id = t * PER_THREAD + i;
                    let delivered = delivered.clone();
                    watcher
                        .create_directory(
                            missing.join(id.to_string()),
                            |_| panic!("parent is missing, creation must fail"),
                            move |err: WatcherError| {
                                assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
                                delivered.lock().unwrap().push(id);
                            },
                            CreateOptions::new(),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert!(wait_until(|| delivered.lock().unwrap().len() >= THREADS * PER_THREAD));
    let watcher = Arc::try_unwrap(watcher).unwrap();
    watcher.join();

    let mut ids = delivered.lock().unwrap().clone();
    ids.sort_unstable();
    assert_eq!(ids, (0..THREADS * PER_THREAD).collect::<Vec<_>>());
    assert!(!missing.exists());
}
