//! Executors for tests

use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use dirwatch::{Executor, Job};

/// Runs every job in the calling thread
pub fn inline() -> Arc<dyn Executor> {
    Arc::new(|job: Job| job())
}

/// Holds jobs until the test drains them, and remembers which thread
/// handed each one over.
#[derive(Default)]
pub struct RecordingExecutor {
    jobs: Mutex<Vec<Job>>,
    submitters: Mutex<Vec<ThreadId>>,
}

impl RecordingExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Run every held job; returns how many ran
    pub fn run_all(&self) -> usize {
        let jobs: Vec<Job> = std::mem::take(&mut *self.jobs.lock().unwrap());
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn submitters(&self) -> Vec<ThreadId> {
        self.submitters.lock().unwrap().clone()
    }
}

impl Executor for RecordingExecutor {
    fn execute(&self, job: Job) {
        self.submitters
            .lock()
            .unwrap()
            .push(std::thread::current().id());
        self.jobs.lock().unwrap().push(job);
    }
}
