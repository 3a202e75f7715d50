use std::path::PathBuf;

use anyhow::{bail, Result};
use webdeploy::presentation::factory;
use webdeploy::{DispatchOutcome, PublishContext, PublishMode, PublishPayload};

use crate::ui::output::{print_config_warnings, print_report};

pub struct PublishArgs {
    pub database: String,
    pub config: PathBuf,
    pub sync: bool,
    pub source_database: Option<String>,
    pub mode: PublishMode,
    pub language: Option<String>,
}

pub fn cmd_publish(args: PublishArgs, json: bool) -> Result<()> {
    if json {
        crate::ui::json::emit_start("publish")?;
    }

    let (mut config, warnings) = super::load_config(&args.config)?;
    if !json {
        print_config_warnings(&warnings);
    }
    if args.sync {
        config.dispatcher.synchronous = true;
    }

    let dispatcher = factory::create_dispatcher(&config)?;

    let mut payload = PublishPayload::new(args.database).with_mode(args.mode);
    if let Some(source) = args.source_database {
        payload = payload.with_source_database(source);
    }
    if let Some(language) = args.language {
        payload = payload.with_language(language);
    }

    let report = match dispatcher.on_publish_completed(&PublishContext::completed(payload))? {
        DispatchOutcome::Completed(report) => report,
        DispatchOutcome::Queued(pending) => pending.wait()?,
        DispatchOutcome::Ignored => bail!("publish notification was ignored"),
    };

    if json {
        crate::ui::json::emit_complete("publish", report.is_success(), &report)?;
    } else {
        print_report(&report)?;
    }

    if !report.is_success() {
        bail!(
            "{} of {} deployment tasks failed",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}
