//! End-to-end dispatch against real folders

mod common;

use std::path::Path;

use common::*;
use webdeploy::config::parse_with_warnings;
use webdeploy::presentation::factory;
use webdeploy::{Config, DispatchOutcome, PublishContext, PublishPayload, TaskStatus};

fn config_from(toml: &str) -> Config {
    let (config, warnings) = parse_with_warnings(toml, Path::new("webdeploy.toml")).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    config
}

fn publish_to(database: &str) -> PublishContext {
    PublishContext::completed(PublishPayload::new(database))
}

#[test]
fn synchronous_publish_mirrors_source_folder() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    env.write("target/stale.txt", "old");

    let config = config_from(&format!(
        "[dispatcher]\nsynchronous = true\n\n{}",
        local_task_toml("media", &env.path("source"), &env.path("target"))
    ));
    let dispatcher = factory::create_dispatcher(&config).unwrap();

    let outcome = dispatcher.on_publish_completed(&publish_to("web")).unwrap();
    let DispatchOutcome::Completed(report) = outcome else {
        panic!("synchronous dispatch should complete inline");
    };

    assert!(report.is_success());
    assert_eq!(list_tree(&env.path("source")), list_tree(&env.path("target")));
    assert_eq!(env.read("target/css/site.css"), "body { margin: 0 }");
    assert!(!env.exists("target/stale.txt"));
}

#[test]
fn second_publish_changes_nothing() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let config = config_from(&format!(
        "[dispatcher]\nsynchronous = true\n\n{}",
        local_task_toml("media", &env.path("source"), &env.path("target"))
    ));
    let dispatcher = factory::create_dispatcher(&config).unwrap();
    dispatcher.run_all(&webdeploy::RunContext::new("web"));

    let report = dispatcher.run_all(&webdeploy::RunContext::new("web"));
    match &report.outcomes[0].status {
        TaskStatus::Succeeded(summary) => {
            assert!(!summary.has_changes(), "unexpected changes: {}", summary);
            assert_eq!(summary.unchanged, 4);
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[test]
fn database_filter_selects_tasks() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let mut toml = String::from("[dispatcher]\nsynchronous = true\n\n");
    toml.push_str(&local_task_toml("web-only", &env.path("source"), &env.path("web")));
    toml.push_str("target_database = \"web\"\n\n");
    toml.push_str(&local_task_toml(
        "preview-only",
        &env.path("source"),
        &env.path("preview"),
    ));
    toml.push_str("target_database = \"preview\"\n\n");
    toml.push_str(&local_task_toml("everywhere", &env.path("source"), &env.path("all")));

    let dispatcher = factory::create_dispatcher(&config_from(&toml)).unwrap();
    let report = dispatcher.run_all(&webdeploy::RunContext::new("web"));

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.skipped(), 1);
    assert!(env.exists("web/index.html"));
    assert!(env.exists("all/index.html"));
    assert!(!env.exists("preview"));
}

#[test]
fn failing_task_does_not_stop_later_tasks() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let mut toml = String::from("[dispatcher]\nsynchronous = true\n\n");
    toml.push_str(&local_task_toml("first", &env.path("source"), &env.path("one")));
    toml.push('\n');
    toml.push_str(&local_task_toml("broken", &env.path("missing"), &env.path("two")));
    toml.push('\n');
    toml.push_str(&local_task_toml("third", &env.path("source"), &env.path("three")));

    let dispatcher = factory::create_dispatcher(&config_from(&toml)).unwrap();
    let report = dispatcher.run_all(&webdeploy::RunContext::new("web"));

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(report.outcomes[1].status, TaskStatus::Failed(_)));
    assert!(env.exists("one/index.html"));
    assert!(env.exists("three/index.html"));
}

#[test]
fn path_filters_limit_the_copy() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    env.write("target/index.html", "keep me");

    let config = config_from(&format!(
        "[dispatcher]\nsynchronous = true\n\n{}paths = [\"images\"]\n",
        local_task_toml("images", &env.path("source"), &env.path("target"))
    ));
    let dispatcher = factory::create_dispatcher(&config).unwrap();
    let report = dispatcher.run_all(&webdeploy::RunContext::new("web"));

    assert!(report.is_success());
    assert!(env.exists("target/images/icons/star.svg"));
    assert!(!env.exists("target/css"));
    assert_eq!(env.read("target/index.html"), "keep me");
}

#[test]
fn asynchronous_publish_reports_through_pending_handle() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let config = config_from(&local_task_toml(
        "media",
        &env.path("source"),
        &env.path("target"),
    ));
    let dispatcher = factory::create_dispatcher(&config).unwrap();
    assert!(!dispatcher.is_synchronous());

    let outcome = dispatcher.on_publish_completed(&publish_to("web")).unwrap();
    let DispatchOutcome::Queued(pending) = outcome else {
        panic!("asynchronous dispatch should queue");
    };

    let report = pending.wait().unwrap();
    assert!(report.is_success());
    assert!(env.exists("target/images/logo.png"));
}

#[test]
fn trace_events_reach_the_sink() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let config = config_from(&format!(
        "[dispatcher]\nsynchronous = true\n\n{}",
        local_task_toml("media", &env.path("source"), &env.path("target"))
    ));
    let sink = RecordingSink::new();
    let dispatcher = factory::create_dispatcher_with_sink(&config, sink.as_sink()).unwrap();
    dispatcher.run_all(&webdeploy::RunContext::new("web"));

    let messages = sink.messages();
    assert!(messages.iter().any(|m| m.starts_with("Synchronizing ")));
    assert_eq!(sink.count("Adding file (index.html)"), 1);
    assert!(messages
        .last()
        .is_some_and(|m| m.starts_with("Synchronization completed")));
}

#[test]
fn empty_notification_runs_nothing() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let config = config_from(&local_task_toml(
        "media",
        &env.path("source"),
        &env.path("target"),
    ));
    let dispatcher = factory::create_dispatcher(&config).unwrap();

    let outcome = dispatcher
        .on_publish_completed(&PublishContext::empty())
        .unwrap();
    assert!(matches!(outcome, DispatchOutcome::Ignored));
    dispatcher.wait_idle().unwrap();
    assert!(!env.exists("target"));
}
