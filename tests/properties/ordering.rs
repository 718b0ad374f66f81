//! Property tests for task ordering.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use dirwatch::{CreateOptions, DirectoryWatcher};
use tempfile::tempdir;

use crate::common::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 24,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: continuations are delivered in submission order, whatever
    /// mix of successes and failures the tasks produce.
    #[test]
    fn property_continuations_follow_submission_order(
        ops in proptest::collection::vec(any::<bool>(), 1..40),
    ) {
        let dir = tempdir().unwrap();
        let executor = RecordingExecutor::new();
        let watcher = DirectoryWatcher::new(executor.clone()).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (i, nested) in ops.iter().enumerate() {
            // Nested paths have no parent yet, so those tasks fail
            let path = if *nested {
                dir.path().join(format!("missing-{i}")).join("child")
            } else {
                dir.path().join(format!("d{i}"))
            };
            let ok = order.clone();
            let err = order.clone();
            watcher
                .create_directory(
                    path,
                    move |_| ok.lock().unwrap().push((i, true)),
                    move |_| err.lock().unwrap().push((i, false)),
                    CreateOptions::new(),
                )
                .unwrap();
        }
        watcher.join();
        executor.run_all();

        let expected: Vec<(usize, bool)> =
            ops.iter().enumerate().map(|(i, nested)| (i, !nested)).collect();
        prop_assert_eq!(&*order.lock().unwrap(), &expected);
    }
}
