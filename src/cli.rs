use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use webdeploy::config::DEFAULT_CONFIG_FILE;
use webdeploy::PublishMode;

/// WebDeploy - mirror published content to local and remote sites
#[derive(Parser, Debug)]
#[command(name = "webdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Raise a publish-completed notification and run the deployment tasks
    Publish {
        /// Database the publish targeted
        #[arg(short, long)]
        database: String,

        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Run tasks on this thread instead of the dispatch worker
        #[arg(long)]
        sync: bool,

        /// Database the publish read from (informational)
        #[arg(long)]
        source_database: Option<String>,

        /// Publish mode (informational)
        #[arg(long, value_enum, default_value_t = ModeArg::Smart)]
        mode: ModeArg,

        /// Content language (informational)
        #[arg(long)]
        language: Option<String>,
    },

    /// List registered deployment tasks
    Tasks {
        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Show whether each task would run for this database
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Validate the config file (non-zero exit on errors)
    Check {
        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Full,
    Smart,
    Incremental,
    SingleItem,
}

impl From<ModeArg> for PublishMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => PublishMode::Full,
            ModeArg::Smart => PublishMode::Smart,
            ModeArg::Incremental => PublishMode::Incremental,
            ModeArg::SingleItem => PublishMode::SingleItem,
        }
    }
}
