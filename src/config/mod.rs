//! Configuration module for WebDeploy
//!
//! Configuration sources, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (WEBDEPLOY_*)
//! 3. Config file (webdeploy.toml)
//! 4. Built-in defaults

mod env_validator;
mod loader;
mod types;

pub use loader::{parse_with_warnings, ConfigWarning};
pub use types::{
    Config, DispatcherConfig, HostConfig, TransportConfig, TransportKind, DEFAULT_CONFIG_FILE,
};
