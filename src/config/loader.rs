//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{WebDeployError, WebDeployResult};

use super::env_validator::{levenshtein, parse_bool, EnvVarValidator, BOOL_VALUES};
use super::types::{Config, TransportKind};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> WebDeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse configuration text; `path` is only used for reporting
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> WebDeployResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| WebDeployError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (WEBDEPLOY_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`
pub(super) fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // WEBDEPLOY_SYNCHRONOUS
    if let Some(val) = lookup("WEBDEPLOY_SYNCHRONOUS") {
        config.dispatcher.synchronous = EnvVarValidator::new("WEBDEPLOY_SYNCHRONOUS", BOOL_VALUES)
            .parse(&val, parse_bool, config.dispatcher.synchronous);
    }

    // WEBDEPLOY_USE_CHECKSUM
    if let Some(val) = lookup("WEBDEPLOY_USE_CHECKSUM") {
        config.dispatcher.use_checksum = EnvVarValidator::new("WEBDEPLOY_USE_CHECKSUM", BOOL_VALUES)
            .parse(&val, parse_bool, config.dispatcher.use_checksum);
    }

    // WEBDEPLOY_APPLICATION_ROOT
    if let Some(root) = lookup("WEBDEPLOY_APPLICATION_ROOT") {
        if !root.trim().is_empty() {
            config.host.application_root = Some(PathBuf::from(root));
        }
    }

    // WEBDEPLOY_TRANSPORT
    if let Some(kind) = lookup("WEBDEPLOY_TRANSPORT") {
        config.transport.kind = EnvVarValidator::new("WEBDEPLOY_TRANSPORT", TransportKind::VALUES)
            .parse(&kind, TransportKind::parse, config.transport.kind);
    }

    // WEBDEPLOY_SSH_PROGRAM
    if let Some(program) = lookup("WEBDEPLOY_SSH_PROGRAM") {
        if !program.trim().is_empty() {
            config.transport.program = program;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "dispatcher",
        "synchronous",
        "use_checksum",
        "host",
        "application_root",
        "transport",
        "kind",
        "program",
        "options",
        "tasks",
        "name",
        "local_root",
        "remote_root",
        "target_server",
        "user_name",
        "password",
        "target_database",
        "paths",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
