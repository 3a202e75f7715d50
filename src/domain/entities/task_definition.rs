//! Deployment task definitions
//!
//! A task definition declares one synchronization job. It is configuration
//! only: the dispatcher builds a fresh runner from it for every publish.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{WebDeployError, WebDeployResult};

/// Declarative description of one synchronization job
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Label used in logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source folder; `None` deploys the running application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,

    /// Destination folder (on `target_server` when set)
    pub remote_root: PathBuf,

    /// Remote host; `None` keeps the destination local
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_server: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Only run for publishes to this database; `None` runs for every publish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_database: Option<String>,

    /// Path filters relative to the roots; empty synchronizes everything
    #[serde(default)]
    pub paths: Vec<String>,
}

impl TaskDefinition {
    pub fn new(remote_root: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            local_root: None,
            remote_root: remote_root.into(),
            target_server: None,
            user_name: None,
            password: None,
            target_database: None,
            paths: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_local_root(mut self, local_root: impl Into<PathBuf>) -> Self {
        self.local_root = Some(local_root.into());
        self
    }

    pub fn with_target_server(
        mut self,
        server: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.target_server = Some(server.into());
        self.user_name = Some(user_name.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_target_database(mut self, database: impl Into<String>) -> Self {
        self.target_database = Some(database.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn is_remote(&self) -> bool {
        self.target_server.is_some()
    }

    /// Whether a publish to `database` should run this task
    ///
    /// Comparison is exact and case-sensitive.
    pub fn applies_to(&self, database: &str) -> bool {
        self.target_database
            .as_deref()
            .map_or(true, |target| target == database)
    }

    /// Name for logs: the configured name, or a description of the copy
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        let source = self
            .local_root
            .as_ref()
            .map_or_else(|| "<application>".to_string(), |p| p.display().to_string());
        match &self.target_server {
            Some(server) => format!("{} -> {}:{}", source, server, self.remote_root.display()),
            None => format!("{} -> {}", source, self.remote_root.display()),
        }
    }

    /// A task with a target server must carry a user name and password
    pub fn ensure_credentials(&self) -> WebDeployResult<()> {
        let Some(server) = &self.target_server else {
            return Ok(());
        };

        let missing = if self.user_name.is_none() {
            Some("user_name")
        } else if self.password.is_none() {
            Some("password")
        } else {
            None
        };

        match missing {
            Some(missing) => Err(WebDeployError::MissingCredentials {
                task: self.label(),
                server: server.clone(),
                missing,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TaskDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("name", &self.name)
            .field("local_root", &self.local_root)
            .field("remote_root", &self.remote_root)
            .field("target_server", &self.target_server)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("target_database", &self.target_database)
            .field("paths", &self.paths)
            .finish()
    }
}
