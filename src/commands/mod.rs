//! CLI command implementations

pub mod check;
pub mod publish;
pub mod tasks;

use std::path::Path;

use anyhow::{Context, Result};
use webdeploy::config::ConfigWarning;
use webdeploy::Config;

/// Load the config file with environment overrides applied
pub fn load_config(path: &Path) -> Result<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = Config::load_with_warnings(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    Ok((config.with_env_overrides(), warnings))
}
