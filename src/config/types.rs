//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::TaskDefinition;
use crate::error::WebDeployResult;

use super::loader::{self, ConfigWarning};

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "webdeploy.toml";

/// Dispatcher behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Run tasks on the notifying thread instead of the background worker
    #[serde(default)]
    pub synchronous: bool,

    /// Compare files by checksum rather than size and timestamp
    #[serde(default = "default_true")]
    pub use_checksum: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            synchronous: false,
            use_checksum: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The host application whose content is deployed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HostConfig {
    /// Content root of the running application (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Reach remote servers with ssh
    #[default]
    Ssh,
    /// Run remote commands in a local shell
    Local,
}

impl TransportKind {
    pub const VALUES: &'static [&'static str] = &["ssh", "local"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ssh" => Some(Self::Ssh),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// How remote task targets are reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub kind: TransportKind,

    /// Remote shell program
    #[serde(default = "default_ssh_program")]
    pub program: String,

    /// Extra arguments passed before the destination
    #[serde(default)]
    pub options: Vec<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::default(),
            program: default_ssh_program(),
            options: Vec::new(),
        }
    }
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dispatcher: DispatcherConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    /// Deployment tasks in registration order
    #[serde(default)]
    pub tasks: Vec<TaskDefinition>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> WebDeployResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WebDeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (WEBDEPLOY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Content root of the running application
    pub fn application_root(&self) -> PathBuf {
        self.host.application_root.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        })
    }
}
