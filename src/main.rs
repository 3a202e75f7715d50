//! WebDeploy CLI
//!
//! Usage: webdeploy <COMMAND>
//!
//! Commands:
//!   publish  Raise a publish-completed notification and run the tasks
//!   tasks    List registered deployment tasks
//!   check    Validate the config file

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    webdeploy::logging::init(cli.verbose);

    match cli.command {
        Commands::Publish {
            database,
            config,
            sync,
            source_database,
            mode,
            language,
        } => commands::publish::cmd_publish(
            commands::publish::PublishArgs {
                database,
                config,
                sync,
                source_database,
                mode: mode.into(),
                language,
            },
            cli.json,
        ),
        Commands::Tasks { config, database } => {
            commands::tasks::cmd_tasks(&config, database.as_deref(), cli.json)
        }
        Commands::Check { config } => commands::check::cmd_check(&config, cli.json),
    }
}
