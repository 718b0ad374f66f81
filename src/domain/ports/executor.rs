//! Executor port - where asynchronous results are delivered
//!
//! The watcher hands every callback (task continuations, stream deliveries)
//! to an `Executor`. It assumes nothing about when or on which thread a job
//! runs, only that it eventually runs exactly once.

/// A zero-argument callback scheduled on an executor
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Caller-supplied execution context
///
/// Implementations:
/// - `ThreadExecutor` - a dedicated delivery thread
/// - any `Fn(Job) + Send + Sync` closure
pub trait Executor: Send + Sync + 'static {
    /// Schedule `job` for later execution
    fn execute(&self, job: Job);
}

impl<F> Executor for F
where
    F: Fn(Job) + Send + Sync + 'static,
{
    fn execute(&self, job: Job) {
        self(job)
    }
}
