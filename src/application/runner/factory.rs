//! Runner Factory
//!
//! Turns a task definition into a [`DeploymentRunner`]:
//! 1. Source site: folder at `local_root`, or the local application
//! 2. Target site: folder at `remote_root`
//! 3. A remote decorator on the target when `target_server` is set
//! 4. Options: never keep extraneous files, checksum as configured
//! 5. One trace decorator on each site, sharing the injected sink
//! 6. Path filters copied in order

use std::sync::Arc;

use crate::domain::entities::{Decorator, RemoteDecorator, Site, TaskDefinition, TraceDecorator};
use crate::domain::ports::{NoopTraceSink, SiteResolver, SyncEngine, TraceSink};
use crate::domain::value_objects::SyncOptions;

use super::deployment::DeploymentRunner;

#[derive(Clone)]
pub struct RunnerFactory {
    use_checksum: bool,
    trace_sink: Arc<dyn TraceSink>,
    resolver: Arc<dyn SiteResolver>,
    engine: Arc<dyn SyncEngine>,
}

impl RunnerFactory {
    pub fn new(resolver: Arc<dyn SiteResolver>, engine: Arc<dyn SyncEngine>) -> Self {
        Self {
            use_checksum: true,
            trace_sink: Arc::new(NoopTraceSink),
            resolver,
            engine,
        }
    }

    pub fn with_use_checksum(mut self, use_checksum: bool) -> Self {
        self.use_checksum = use_checksum;
        self
    }

    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = sink;
        self
    }

    pub fn use_checksum(&self) -> bool {
        self.use_checksum
    }

    /// Build a runner; deterministic for a given definition
    pub fn build(&self, task: &TaskDefinition) -> DeploymentRunner {
        let mut source_site = match &task.local_root {
            Some(root) => Site::folder(root),
            None => Site::local_application(),
        };

        let mut target_site = Site::folder(&task.remote_root);
        if let Some(server) = &task.target_server {
            target_site.decorate(Decorator::Remote(RemoteDecorator::new(
                server.clone(),
                task.user_name.clone().unwrap_or_default(),
                task.password.clone().unwrap_or_default(),
            )));
        }

        let trace = TraceDecorator::new(Arc::clone(&self.trace_sink));
        source_site.decorate(Decorator::Trace(trace.clone()));
        target_site.decorate(Decorator::Trace(trace));

        DeploymentRunner::new(
            task.label(),
            source_site,
            target_site,
            SyncOptions::for_deployment(self.use_checksum),
            task.paths.clone(),
            Arc::clone(&self.resolver),
            Arc::clone(&self.engine),
        )
    }
}

impl std::fmt::Debug for RunnerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerFactory")
            .field("use_checksum", &self.use_checksum)
            .field("engine", &self.engine.name())
            .finish_non_exhaustive()
    }
}
