//! Test environment builder for isolated WebDeploy testing.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a WebDeploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse the stdout NDJSON stream
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
            .collect()
    }
}

/// Isolated directory holding sources, targets and the config file
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file below the root, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Write `webdeploy.toml`; `{root}` is replaced with the env root
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let root = self.root.path().display().to_string();
        self.write("webdeploy.toml", &toml.replace("{root}", &root))
    }

    /// Run the webdeploy binary from the env root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_in(self.root.path(), args)
    }

    pub fn run_in(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_webdeploy"));
        cmd.current_dir(cwd).args(args);
        for (key, _) in std::env::vars() {
            if key.starts_with("WEBDEPLOY_") {
                cmd.env_remove(key);
            }
        }

        let output = cmd.output().expect("Failed to execute webdeploy");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
