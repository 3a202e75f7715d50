//! Dispatch worker
//!
//! A single named thread that runs queued publishes one at a time, in the
//! order they were accepted. Dropping the worker closes the queue and joins
//! the thread once everything already queued has run.

use std::sync::atomic::Ordering;
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::domain::value_objects::RunContext;
use crate::error::{WebDeployError, WebDeployResult};

use super::report::DispatchReport;
use super::{Activity, DispatcherCore};

enum Job {
    Dispatch {
        context: RunContext,
        reply: mpsc::Sender<DispatchReport>,
    },
    Barrier(mpsc::Sender<()>),
}

/// Handle to a queued dispatch
///
/// Dropping it does not cancel the dispatch.
#[derive(Debug)]
pub struct PendingDispatch {
    receiver: mpsc::Receiver<DispatchReport>,
}

impl PendingDispatch {
    /// Block until the dispatch has run
    pub fn wait(self) -> WebDeployResult<DispatchReport> {
        self.receiver
            .recv()
            .map_err(|_| WebDeployError::WorkerStopped)
    }
}

pub(super) struct Worker {
    sender: Option<mpsc::Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    core: Arc<DispatcherCore>,
}

impl Worker {
    pub(super) fn spawn(core: Arc<DispatcherCore>) -> WebDeployResult<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let worker_core = Arc::clone(&core);

        let handle = thread::Builder::new()
            .name("webdeploy-dispatch".to_string())
            .spawn(move || {
                for job in receiver {
                    match job {
                        Job::Dispatch { context, reply } => {
                            let report = {
                                let _active = Activity::adopt(&worker_core.active);
                                worker_core.run(&context)
                            };
                            // The caller may have dropped its handle
                            let _ = reply.send(report);
                        }
                        Job::Barrier(done) => {
                            let _ = done.send(());
                        }
                    }
                }
                debug!("dispatch worker stopped");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            core,
        })
    }

    fn send(&self, job: Job) -> WebDeployResult<()> {
        self.sender
            .as_ref()
            .ok_or(WebDeployError::WorkerStopped)?
            .send(job)
            .map_err(|_| WebDeployError::WorkerStopped)
    }

    /// Queue a dispatch behind everything already accepted
    pub(super) fn submit(&self, context: RunContext) -> WebDeployResult<PendingDispatch> {
        let (reply, receiver) = mpsc::channel();
        self.core.active.fetch_add(1, Ordering::SeqCst);

        if let Err(err) = self.send(Job::Dispatch { context, reply }) {
            self.core.active.fetch_sub(1, Ordering::SeqCst);
            return Err(err);
        }
        Ok(PendingDispatch { receiver })
    }

    pub(super) fn wait_idle(&self) -> WebDeployResult<()> {
        let (done, receiver) = mpsc::channel();
        self.send(Job::Barrier(done))?;
        receiver.recv().map_err(|_| WebDeployError::WorkerStopped)
    }

    pub(super) fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("dispatch worker panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
