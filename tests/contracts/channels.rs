//! Event channel contracts

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dirwatch::{DirectoryWatcher, WatcherError};

use crate::common::*;

/// CONTRACT: loop-scoped errors go to every live subscriber, once each
#[test]
fn contract_errors_reach_each_live_subscriber_once() {
    let watcher = DirectoryWatcher::new(inline()).unwrap();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counter = first.clone();
    let _a = watcher.errors_stream().subscribe(move |err| {
        assert!(matches!(**err, WatcherError::UnhandledTask { .. }));
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = second.clone();
    let b = watcher.errors_stream().subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    watcher.submit(|| panic!("first")).unwrap();
    assert!(wait_until(|| second.load(Ordering::SeqCst) == 1));
    b.unsubscribe();
    watcher.submit(|| panic!("second")).unwrap();
    watcher.join();

    assert_eq!(first.load(Ordering::SeqCst), 2);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

/// CONTRACT: values pushed with no subscriber are dropped, not buffered
#[test]
fn contract_errors_without_subscribers_are_dropped() {
    let watcher = DirectoryWatcher::new(inline()).unwrap();
    assert!(watcher.watch_or_stream_error("/definitely/not/here").is_none());

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let _sub = watcher.errors_stream().subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    watcher.join();

    assert_eq!(seen.load(Ordering::SeqCst), 0);
}

/// CONTRACT: dropping a subscription handle does not unsubscribe
#[test]
fn contract_dropped_subscription_stays_registered() {
    let watcher = DirectoryWatcher::new(inline()).unwrap();
    let stream = watcher.errors_stream();

    drop(stream.subscribe(|_| {}));

    assert_eq!(stream.subscriber_count(), 1);
    watcher.join();
}
