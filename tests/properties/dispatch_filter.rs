//! Properties of publish-time task filtering

use std::sync::Arc;

use proptest::prelude::*;
use webdeploy::config::DispatcherConfig;
use webdeploy::domain::ports::{ContentSite, SiteResult, SyncEngine, SyncSummary};
use webdeploy::domain::value_objects::SyncOptions;
use webdeploy::infrastructure::{ShellTransport, SiteEnvironment};
use webdeploy::{PublishDispatcher, RunContext, RunnerFactory, TaskDefinition, TaskStatus};

/// Engine that succeeds without touching either site
struct NullEngine;

impl SyncEngine for NullEngine {
    fn name(&self) -> &'static str {
        "null"
    }

    fn synchronize(
        &self,
        _source: &dyn ContentSite,
        _target: &dyn ContentSite,
        _options: &SyncOptions,
        _paths: &[String],
    ) -> SiteResult<SyncSummary> {
        Ok(SyncSummary::default())
    }
}

const DATABASES: &[&str] = &["web", "preview", "Web", "staging"];

fn database() -> impl Strategy<Value = String> {
    prop::sample::select(DATABASES).prop_map(str::to_string)
}

fn dispatcher(filters: &[Option<String>]) -> PublishDispatcher {
    let environment = SiteEnvironment::new(std::env::temp_dir(), Arc::new(ShellTransport::default()));
    let factory = RunnerFactory::new(Arc::new(environment), Arc::new(NullEngine));
    let config = DispatcherConfig {
        synchronous: true,
        ..DispatcherConfig::default()
    };
    let dispatcher = PublishDispatcher::new(&config, factory).unwrap();

    for (index, filter) in filters.iter().enumerate() {
        let mut task = TaskDefinition::new(std::env::temp_dir())
            .with_name(format!("task-{}", index))
            .with_local_root(std::env::temp_dir());
        task.target_database = filter.clone();
        dispatcher.register_task(task).unwrap();
    }
    dispatcher
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_task_is_reported_in_registration_order(
        filters in prop::collection::vec(prop::option::of(database()), 0..6),
        published in database(),
    ) {
        let report = dispatcher(&filters).run_all(&RunContext::new(published.clone()));

        prop_assert_eq!(report.outcomes.len(), filters.len());
        for (index, (outcome, filter)) in report.outcomes.iter().zip(&filters).enumerate() {
            prop_assert_eq!(outcome.index, index);
            let should_run = filter.as_deref().map_or(true, |db| db == published);
            prop_assert_eq!(!matches!(outcome.status, TaskStatus::Skipped), should_run);
        }
    }

    #[test]
    fn skipped_plus_run_equals_registered(
        filters in prop::collection::vec(prop::option::of(database()), 0..6),
        published in database(),
    ) {
        let report = dispatcher(&filters).run_all(&RunContext::new(published));
        prop_assert_eq!(report.succeeded() + report.failed() + report.skipped(), filters.len());
        prop_assert_eq!(report.failed(), 0);
    }
}
