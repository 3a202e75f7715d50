//! Publish Dispatcher
//!
//! Reacts to publish-completed notifications by running every registered
//! deployment task that applies to the published database.
//!
//! ## Structure
//!
//! - `report` - Per-task outcomes (`DispatchReport`, `TaskOutcome`, `TaskStatus`)
//! - `worker` - Background queue for asynchronous dispatch (`PendingDispatch`)
//!
//! In synchronous mode a notification runs on the caller's thread. Otherwise
//! it is queued to a single worker owned by the dispatcher, so dispatches of
//! one dispatcher never overlap and run in arrival order.

mod report;
mod worker;

pub use report::{DispatchReport, TaskOutcome, TaskStatus};
pub use worker::PendingDispatch;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::application::runner::RunnerFactory;
use crate::config::DispatcherConfig;
use crate::domain::entities::TaskDefinition;
use crate::domain::value_objects::{PublishContext, RunContext};
use crate::error::{WebDeployError, WebDeployResult};

use worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Running,
}

/// What `on_publish_completed` did with a notification
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Not a completed publish
    Ignored,
    /// Handed to the worker
    Queued(PendingDispatch),
    /// Ran on the calling thread
    Completed(DispatchReport),
}

/// State shared between the dispatcher and its worker
pub(crate) struct DispatcherCore {
    tasks: RwLock<Vec<TaskDefinition>>,
    factory: RunnerFactory,
    /// Accepted dispatches not yet finished
    active: AtomicUsize,
}

impl DispatcherCore {
    fn new(factory: RunnerFactory) -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
            factory,
            active: AtomicUsize::new(0),
        }
    }

    /// Attempt every applicable task in registration order
    fn run(&self, context: &RunContext) -> DispatchReport {
        let tasks = self.tasks.read().clone();
        let database = context.target_database.as_str();
        info!(database, tasks = tasks.len(), "running deployment tasks");

        let mut report = DispatchReport::new(database);
        for (index, task) in tasks.iter().enumerate() {
            let label = task.label();
            if !task.applies_to(database) {
                debug!(task = %label, database, "task targets another database, skipping");
                report.push(index, label, TaskStatus::Skipped);
                continue;
            }

            let attempt =
                panic::catch_unwind(AssertUnwindSafe(|| self.factory.build(task).execute()));
            match attempt {
                Ok(Ok(summary)) => {
                    info!(task = %label, database, %summary, "deployment task finished");
                    report.push(index, label, TaskStatus::Succeeded(summary));
                }
                Ok(Err(err)) => {
                    error!(task = %label, database, error = %err, "deployment task failed");
                    report.push(index, label, TaskStatus::Failed(err.to_string()));
                }
                Err(payload) => {
                    let message = format!("task panicked: {}", panic_message(payload.as_ref()));
                    error!(task = %label, database, error = %message, "deployment task failed");
                    report.push(index, label, TaskStatus::Failed(message));
                }
            }
        }

        info!(
            database,
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "deployment tasks done"
        );
        report
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Marks the dispatcher Running for the guard's lifetime
struct Activity<'a>(&'a AtomicUsize);

impl<'a> Activity<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }

    /// Take over a count already recorded when the work was accepted
    fn adopt(counter: &'a AtomicUsize) -> Self {
        Self(counter)
    }
}

impl Drop for Activity<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct PublishDispatcher {
    core: Arc<DispatcherCore>,
    synchronous: bool,
    worker: Option<Worker>,
}

impl PublishDispatcher {
    /// Create a dispatcher; asynchronous mode starts its worker thread
    pub fn new(config: &DispatcherConfig, factory: RunnerFactory) -> WebDeployResult<Self> {
        let factory = factory.with_use_checksum(config.use_checksum);
        let core = Arc::new(DispatcherCore::new(factory));
        let worker = if config.synchronous {
            None
        } else {
            Some(Worker::spawn(Arc::clone(&core))?)
        };

        Ok(Self {
            core,
            synchronous: config.synchronous,
            worker,
        })
    }

    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// Append a task; duplicates are kept
    pub fn register_task(&self, task: TaskDefinition) -> WebDeployResult<()> {
        task.ensure_credentials()?;
        debug!(task = %task.label(), "registered deployment task");
        self.core.tasks.write().push(task);
        Ok(())
    }

    /// Registered tasks in registration order
    pub fn tasks(&self) -> Vec<TaskDefinition> {
        self.core.tasks.read().clone()
    }

    pub fn state(&self) -> DispatcherState {
        if self.core.active.load(Ordering::SeqCst) > 0 {
            DispatcherState::Running
        } else {
            DispatcherState::Idle
        }
    }

    /// Handle a publish-completed notification
    pub fn on_publish_completed(&self, context: &PublishContext) -> WebDeployResult<DispatchOutcome> {
        let (Some(payload), Some(run)) = (context.publisher(), context.run_context()) else {
            debug!("notification carries no publish, ignoring");
            return Ok(DispatchOutcome::Ignored);
        };

        info!(
            database = %payload.target_database,
            source = payload.source_database.as_deref().unwrap_or("-"),
            mode = %payload.mode,
            language = payload.language.as_deref().unwrap_or("-"),
            "publish completed"
        );

        if self.synchronous {
            return Ok(DispatchOutcome::Completed(self.run_all(&run)));
        }
        self.worker
            .as_ref()
            .ok_or(WebDeployError::WorkerStopped)?
            .submit(run)
            .map(DispatchOutcome::Queued)
    }

    /// Run every applicable task on the calling thread
    ///
    /// Failures are logged and reported per task, never returned.
    pub fn run_all(&self, context: &RunContext) -> DispatchReport {
        let _active = Activity::enter(&self.core.active);
        self.core.run(context)
    }

    /// Block until every queued notification has been processed
    pub fn wait_idle(&self) -> WebDeployResult<()> {
        match &self.worker {
            Some(worker) => worker.wait_idle(),
            None => Ok(()),
        }
    }

    /// Drain the queue and stop the worker
    pub fn shutdown(&mut self) {
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}

impl std::fmt::Debug for PublishDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishDispatcher")
            .field("synchronous", &self.is_synchronous())
            .field("tasks", &self.core.tasks.read().len())
            .field("state", &self.state())
            .finish()
    }
}
