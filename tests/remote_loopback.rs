//! Remote deployment through the local shell transport
//!
//! The "remote" host is this machine; commands run under `sh -c`, so the
//! tests exercise the same listing and transfer commands an SSH target would.

#![cfg(target_os = "linux")]

mod common;

use std::path::Path;

use common::*;
use webdeploy::config::parse_with_warnings;
use webdeploy::presentation::factory;
use webdeploy::{RunContext, TaskStatus};

fn remote_config(env: &TestEnv, extra: &str) -> webdeploy::Config {
    let toml = format!(
        "[dispatcher]\nsynchronous = true\n\n[transport]\nkind = \"local\"\n\n{}target_server = \"localhost\"\nuser_name = \"deploy\"\npassword = \"secret\"\n{}",
        local_task_toml("remote", &env.path("source"), &env.path("remote")),
        extra
    );
    parse_with_warnings(&toml, Path::new("webdeploy.toml"))
        .unwrap()
        .0
}

#[test]
fn remote_target_receives_full_tree() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    std::fs::create_dir_all(env.path("remote")).unwrap();
    env.write("remote/obsolete/page.html", "gone");

    let dispatcher = factory::create_dispatcher(&remote_config(&env, "")).unwrap();
    let report = dispatcher.run_all(&RunContext::new("web"));

    assert!(report.is_success(), "{:?}", report);
    assert_eq!(list_tree(&env.path("source")), list_tree(&env.path("remote")));
    assert_eq!(env.read("remote/images/icons/star.svg"), "<svg/>");
}

#[test]
fn remote_resync_is_unchanged() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    std::fs::create_dir_all(env.path("remote")).unwrap();

    let dispatcher = factory::create_dispatcher(&remote_config(&env, "")).unwrap();
    dispatcher.run_all(&RunContext::new("web"));
    env.write("source/index.html", "<html>v2</html>");

    let report = dispatcher.run_all(&RunContext::new("web"));
    match &report.outcomes[0].status {
        TaskStatus::Succeeded(summary) => {
            assert_eq!(summary.updated, 1);
            assert_eq!(summary.unchanged, 3);
        }
        other => panic!("unexpected status {:?}", other),
    }
    assert_eq!(env.read("remote/index.html"), "<html>v2</html>");
}

#[test]
fn missing_remote_root_is_created() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);

    let dispatcher = factory::create_dispatcher(&remote_config(&env, "")).unwrap();
    let report = dispatcher.run_all(&RunContext::new("web"));

    assert!(report.is_success(), "{:?}", report);
    assert!(env.path("remote").is_dir());
}

#[test]
fn remote_root_that_is_a_file_fails_the_task() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    env.write("remote", "not a directory");

    let dispatcher = factory::create_dispatcher(&remote_config(&env, "")).unwrap();
    let report = dispatcher.run_all(&RunContext::new("web"));

    assert_eq!(report.failed(), 1);
    assert_eq!(env.read("remote"), "not a directory");
}

#[test]
fn remote_path_filter_only_touches_scope() {
    let env = TestEnv::new();
    seed_tree(&env.path("source"), MEDIA_TREE);
    env.write("remote/index.html", "remote copy");

    let dispatcher =
        factory::create_dispatcher(&remote_config(&env, "paths = [\"css\"]\n")).unwrap();
    let report = dispatcher.run_all(&RunContext::new("web"));

    assert!(report.is_success(), "{:?}", report);
    assert_eq!(env.read("remote/css/site.css"), "body { margin: 0 }");
    assert_eq!(env.read("remote/index.html"), "remote copy");
    assert!(!env.exists("remote/images"));
}

#[test]
fn large_write_into_blocked_path_is_command_failure() {
    use std::sync::Arc;
    use webdeploy::domain::entities::RemoteDecorator;
    use webdeploy::domain::ports::{ContentSite, SiteError};
    use webdeploy::infrastructure::{FolderSite, RemoteSite, ShellTransport};

    let env = TestEnv::new();
    env.write("remote/blocker", "a file, not a directory");
    let site = RemoteSite::new(
        Box::new(FolderSite::new(env.path("remote"))),
        RemoteDecorator::new("localhost", "deploy", "secret"),
        Arc::new(ShellTransport::default()),
    );

    for size in [4, 4 << 20] {
        let payload = vec![b'x'; size];
        let err = site.write("blocker/a.txt", &payload, None).unwrap_err();
        assert!(
            matches!(err, SiteError::CommandFailed { .. }),
            "{} byte write: {:?}",
            size,
            err
        );
    }
    assert_eq!(env.read("remote/blocker"), "a file, not a directory");
}
