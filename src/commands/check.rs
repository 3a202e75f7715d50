use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::ui::output::print_config_warnings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
struct CheckItem {
    name: String,
    status: CheckStatus,
    message: String,
}

impl CheckItem {
    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

pub fn cmd_check(config_path: &Path, json: bool) -> Result<()> {
    if json {
        crate::ui::json::emit_start("check")?;
    }

    let (config, warnings) = super::load_config(config_path)?;
    let mut items = Vec::new();

    for warning in &warnings {
        items.push(CheckItem::new("config", CheckStatus::Warning, warning.to_string()));
    }

    let application_root = config.application_root();
    if application_root.is_dir() {
        items.push(CheckItem::new(
            "application_root",
            CheckStatus::Pass,
            application_root.display().to_string(),
        ));
    } else {
        items.push(CheckItem::new(
            "application_root",
            CheckStatus::Warning,
            format!("{} is not a directory", application_root.display()),
        ));
    }

    if config.tasks.is_empty() {
        items.push(CheckItem::new("tasks", CheckStatus::Warning, "no deployment tasks"));
    }

    for task in &config.tasks {
        let label = task.label();
        if let Err(err) = task.ensure_credentials() {
            items.push(CheckItem::new(label, CheckStatus::Error, err.to_string()));
            continue;
        }
        match &task.local_root {
            Some(root) if !root.is_dir() => items.push(CheckItem::new(
                label,
                CheckStatus::Warning,
                format!("local_root {} is not a directory", root.display()),
            )),
            _ => items.push(CheckItem::new(label, CheckStatus::Pass, "ok")),
        }
    }

    let errors = items
        .iter()
        .filter(|item| item.status == CheckStatus::Error)
        .count();

    if json {
        crate::ui::json::emit_complete("check", errors == 0, &items)?;
    } else {
        print_config_warnings(&warnings);
        for item in items.iter().filter(|item| item.name != "config") {
            let icon = match item.status {
                CheckStatus::Pass => "✓",
                CheckStatus::Warning => "⚠",
                CheckStatus::Error => "✗",
            };
            println!("{} {}: {}", icon, item.name, item.message);
        }
    }

    if errors > 0 {
        bail!("{} configuration error(s)", errors);
    }
    Ok(())
}
