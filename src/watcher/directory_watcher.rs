//! DirectoryWatcher - the public face of the IO loop
//!
//! Usage:
//!
//! ```no_run
//! use std::sync::Arc;
//! use dirwatch::{DirectoryWatcher, ThreadExecutor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let watcher = DirectoryWatcher::new(Arc::new(ThreadExecutor::new()?))?;
//!
//! let _sub = watcher.signalled_handles_stream().subscribe(|handle| {
//!     for event in handle.poll_events() {
//!         println!("{} {}", event.kind, event.path.display());
//!     }
//!     // Re-arm the handle, or it will not be signalled again
//!     handle.reset();
//! });
//!
//! watcher.watch("/tmp")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::SystemTime;

use crate::config::{WatcherConfig, IN_MEMORY_ORIGIN};
use crate::domain::entities::{PathElement, WatchHandle};
use crate::domain::ports::{Executor, NotificationService, TreeBuilder};
use crate::domain::value_objects::{CreateOptions, EventKind};
use crate::error::{WatcherError, WatcherResult};
use crate::infrastructure::{FsTreeBuilder, NotifyService};

use super::channel::{EventChannel, EventStream};
use super::io_loop::IoLoop;
use super::promise::{promise, Promise};
use super::task::{Task, TaskQueue};

/// Watches directories and serializes file system mutations onto one
/// background IO thread.
///
/// Every callback (mutation continuations, stream subscribers) runs on the
/// executor given at construction, never on the IO thread and never inline
/// in the calling thread.
///
/// Dropping the watcher requests shutdown without waiting for the IO thread;
/// use [`DirectoryWatcher::join`] to wait.
pub struct DirectoryWatcher {
    service: Arc<dyn NotificationService>,
    tree_builder: Arc<dyn TreeBuilder>,
    executor: Arc<dyn Executor>,
    queue: Arc<TaskQueue>,
    errors: EventChannel<Arc<WatcherError>>,
    signalled: EventChannel<WatchHandle>,
    event_kinds: Vec<EventKind>,
    io_thread: Option<JoinHandle<()>>,
}

/// Builder for watchers with custom collaborators
#[derive(Default)]
pub struct DirectoryWatcherBuilder {
    config: WatcherConfig,
    service: Option<Arc<dyn NotificationService>>,
    tree_builder: Option<Arc<dyn TreeBuilder>>,
}

impl DirectoryWatcherBuilder {
    /// Set the watcher configuration
    pub fn with_config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom notification service instead of `NotifyService`
    pub fn with_notification_service(mut self, service: Arc<dyn NotificationService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Use a custom tree builder instead of `FsTreeBuilder`
    pub fn with_tree_builder(mut self, tree_builder: Arc<dyn TreeBuilder>) -> Self {
        self.tree_builder = Some(tree_builder);
        self
    }

    /// Create the watcher and start its IO thread
    ///
    /// Fails with [`WatcherError::Config`] when the configuration is invalid.
    pub fn build(self, executor: Arc<dyn Executor>) -> WatcherResult<DirectoryWatcher> {
        self.config.validate(Path::new(IN_MEMORY_ORIGIN))?;
        let service: Arc<dyn NotificationService> = match self.service {
            Some(service) => service,
            None => Arc::new(NotifyService::new().map_err(|source| WatcherError::Init { source })?),
        };
        let tree_builder: Arc<dyn TreeBuilder> = match self.tree_builder {
            Some(tree_builder) => tree_builder,
            None => Arc::new(FsTreeBuilder::new()),
        };

        let queue = Arc::new(TaskQueue::new());
        let errors = EventChannel::new("errors", executor.clone());
        let signalled = EventChannel::new("signalled handles", executor.clone());

        let io_loop = IoLoop {
            service: service.clone(),
            queue: queue.clone(),
            errors: errors.clone(),
            signalled: signalled.clone(),
        };
        let io_thread = io_loop
            .spawn(&self.config.io_thread_name)
            .map_err(|source| WatcherError::Init { source })?;
        log::debug!("started IO thread '{}'", self.config.io_thread_name);

        Ok(DirectoryWatcher {
            service,
            tree_builder,
            executor,
            queue,
            errors,
            signalled,
            event_kinds: self.config.event_kinds(),
            io_thread: Some(io_thread),
        })
    }
}

impl DirectoryWatcher {
    /// Create a watcher with default settings
    pub fn new(executor: Arc<dyn Executor>) -> WatcherResult<Self> {
        Self::builder().build(executor)
    }

    /// Create a watcher from configuration
    pub fn with_config(config: &WatcherConfig, executor: Arc<dyn Executor>) -> WatcherResult<Self> {
        Self::builder().with_config(config.clone()).build(executor)
    }

    pub fn builder() -> DirectoryWatcherBuilder {
        DirectoryWatcherBuilder::default()
    }

    /// Watch `dir` for entry create, delete and modify events.
    ///
    /// Consumers of the signalled-handles stream must call
    /// [`WatchHandle::reset`] to keep receiving the handle.
    pub fn watch(&self, dir: impl AsRef<Path>) -> WatcherResult<WatchHandle> {
        let dir = dir.as_ref();
        self.service
            .register(dir, &self.event_kinds)
            .map_err(|source| WatcherError::Registration {
                path: dir.to_path_buf(),
                source,
            })
    }

    /// Like [`watch`](Self::watch), but a failure is published on the error
    /// stream instead of being returned.
    pub fn watch_or_stream_error(&self, dir: impl AsRef<Path>) -> Option<WatchHandle> {
        match self.watch(dir) {
            Ok(handle) => Some(handle),
            Err(err) => {
                self.errors.push(Arc::new(err));
                None
            }
        }
    }

    /// Create a new file on the IO thread.
    ///
    /// `on_success` receives the file's last-modified time; `on_error`
    /// receives a [`WatcherError::Mutation`]. Fails with `Rejected` after
    /// shutdown, in which case neither callback runs.
    pub fn create_file<S, E>(
        &self,
        file: impl Into<PathBuf>,
        on_success: S,
        on_error: E,
        options: CreateOptions,
    ) -> WatcherResult<()>
    where
        S: FnOnce(SystemTime) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        let file = file.into();
        self.execute_io_operation(
            "create_file",
            move || {
                let mutation = |source| WatcherError::Mutation {
                    path: file.clone(),
                    source,
                };
                options.open_options().open(&file).map_err(mutation)?;
                std::fs::metadata(&file)
                    .and_then(|m| m.modified())
                    .map_err(mutation)
            },
            on_success,
            on_error,
        )
    }

    /// Create a single directory on the IO thread. The parent must exist.
    ///
    /// `on_success` receives the new directory's path.
    pub fn create_directory<S, E>(
        &self,
        dir: impl Into<PathBuf>,
        on_success: S,
        on_error: E,
        options: CreateOptions,
    ) -> WatcherResult<()>
    where
        S: FnOnce(PathBuf) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        self.create_dir("create_directory", dir.into(), false, on_success, on_error, options)
    }

    /// Create a directory and every missing parent on the IO thread.
    ///
    /// An already existing directory counts as success.
    pub fn create_directories<S, E>(
        &self,
        dir: impl Into<PathBuf>,
        on_success: S,
        on_error: E,
        options: CreateOptions,
    ) -> WatcherResult<()>
    where
        S: FnOnce(PathBuf) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        self.create_dir("create_directories", dir.into(), true, on_success, on_error, options)
    }

    fn create_dir<S, E>(
        &self,
        label: &'static str,
        dir: PathBuf,
        recursive: bool,
        on_success: S,
        on_error: E,
        options: CreateOptions,
    ) -> WatcherResult<()>
    where
        S: FnOnce(PathBuf) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        self.execute_io_operation(
            label,
            move || match options.dir_builder(recursive).create(&dir) {
                Ok(()) => Ok(dir),
                Err(source) => Err(WatcherError::Mutation { path: dir, source }),
            },
            on_success,
            on_error,
        )
    }

    /// Run `job` on the IO thread.
    ///
    /// A panic inside `job` is published on the error stream as
    /// [`WatcherError::UnhandledTask`].
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) -> WatcherResult<()> {
        self.queue.enqueue(Task::new("submitted", job))
    }

    /// Enumerate the tree rooted at `root` on the IO thread.
    ///
    /// The promise fails with [`WatcherError::Enumeration`] on any I/O error.
    pub fn tree(&self, root: impl Into<PathBuf>) -> WatcherResult<Promise<PathElement>> {
        let root = root.into();
        let builder = self.tree_builder.clone();
        let (completer, pending) = promise();

        self.queue.enqueue(Task::new("tree", move || {
            let result = builder
                .build(&root)
                .map_err(|source| WatcherError::Enumeration { root, source });
            completer.complete(result);
        }))?;
        Ok(pending)
    }

    /// Stop accepting work and let the IO thread finish. Idempotent.
    ///
    /// Already queued tasks still run. The executor is not shut down.
    pub fn shutdown(&self) {
        if self.queue.shutdown() {
            log::debug!("directory watcher shutdown requested");
        }
    }

    /// Whether [`shutdown`](Self::shutdown) has been called
    pub fn is_shutdown(&self) -> bool {
        self.queue.is_shutdown()
    }

    /// Shut down and wait for the IO thread to exit.
    ///
    /// Called from the IO thread itself (inside a submitted job) this only
    /// requests shutdown.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.io_thread.take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                log::warn!("IO thread terminated by a panic");
            }
        }
    }

    /// Errors that are not tied to a single operation
    pub fn errors_stream(&self) -> EventStream<Arc<WatcherError>> {
        self.errors.stream()
    }

    /// Watch handles that have pending events
    pub fn signalled_handles_stream(&self) -> EventStream<WatchHandle> {
        self.signalled.stream()
    }

    /// Event kinds requested by `watch`
    pub fn event_kinds(&self) -> &[EventKind] {
        &self.event_kinds
    }

    fn execute_io_operation<T, Op, S, E>(
        &self,
        label: &'static str,
        operation: Op,
        on_success: S,
        on_error: E,
    ) -> WatcherResult<()>
    where
        T: Send + 'static,
        Op: FnOnce() -> WatcherResult<T> + Send + 'static,
        S: FnOnce(T) + Send + 'static,
        E: FnOnce(WatcherError) + Send + 'static,
    {
        self.queue.enqueue(Task::with_continuations(
            label,
            operation,
            on_success,
            on_error,
            self.executor.clone(),
        ))
    }
}

impl Drop for DirectoryWatcher {
    fn drop(&mut self) {
        self.queue.shutdown();
    }
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("shutdown", &self.is_shutdown())
            .field("queued_tasks", &self.queue.len())
            .field("event_kinds", &self.event_kinds)
            .finish()
    }
}
