//! Dispatcher Factory
//!
//! Creates the dispatcher with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{PublishDispatcher, RunnerFactory};
use crate::config::{Config, TransportConfig, TransportKind};
use crate::domain::ports::{RemoteTransport, TraceSink};
use crate::domain::services::TreeSyncEngine;
use crate::error::WebDeployResult;
use crate::infrastructure::{LogTraceSink, ShellTransport, SiteEnvironment, SshTransport};

/// Create the transport used for remote task targets
pub fn create_transport(config: &TransportConfig) -> Arc<dyn RemoteTransport> {
    match config.kind {
        TransportKind::Ssh => Arc::new(
            SshTransport::new(config.program.clone()).with_options(config.options.clone()),
        ),
        TransportKind::Local => Arc::new(ShellTransport::default()),
    }
}

/// Create the environment sites are opened against
pub fn create_environment(config: &Config) -> SiteEnvironment {
    SiteEnvironment::new(config.application_root(), create_transport(&config.transport))
}

/// Create a runner factory that traces through `sink`
pub fn create_runner_factory(config: &Config, sink: Arc<dyn TraceSink>) -> RunnerFactory {
    RunnerFactory::new(
        Arc::new(create_environment(config)),
        Arc::new(TreeSyncEngine::new()),
    )
    .with_use_checksum(config.dispatcher.use_checksum)
    .with_trace_sink(sink)
}

/// Create a dispatcher with every configured task registered
///
/// Trace events are logged through `tracing`.
pub fn create_dispatcher(config: &Config) -> WebDeployResult<PublishDispatcher> {
    create_dispatcher_with_sink(config, Arc::new(LogTraceSink))
}

/// Create a dispatcher whose runners report trace events to `sink`
pub fn create_dispatcher_with_sink(
    config: &Config,
    sink: Arc<dyn TraceSink>,
) -> WebDeployResult<PublishDispatcher> {
    let dispatcher =
        PublishDispatcher::new(&config.dispatcher, create_runner_factory(config, sink))?;
    for task in &config.tasks {
        dispatcher.register_task(task.clone())?;
    }
    Ok(dispatcher)
}
