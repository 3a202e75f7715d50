use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::ui::output::print_config_warnings;

pub fn cmd_tasks(config_path: &Path, database: Option<&str>, json: bool) -> Result<()> {
    if json {
        crate::ui::json::emit_start("tasks")?;
    }

    let (config, warnings) = super::load_config(config_path)?;

    if json {
        let tasks: Vec<_> = config
            .tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                json!({
                    "index": index,
                    "label": task.label(),
                    "definition": task,
                    "applies": database.map(|db| task.applies_to(db)),
                })
            })
            .collect();
        crate::ui::json::emit_complete("tasks", true, &json!({ "database": database, "tasks": tasks }))?;
        return Ok(());
    }

    print_config_warnings(&warnings);
    if config.tasks.is_empty() {
        println!("No deployment tasks in {}", config_path.display());
        return Ok(());
    }

    for (index, task) in config.tasks.iter().enumerate() {
        let marker = match database {
            Some(db) if task.applies_to(db) => "✓ ",
            Some(_) => "○ ",
            None => "",
        };
        let filter = task.target_database.as_deref().unwrap_or("*");
        println!("{:>3}. {}{} [database: {}]", index + 1, marker, task.label(), filter);
        for path in &task.paths {
            println!("       - {}", path);
        }
    }
    Ok(())
}
