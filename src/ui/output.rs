//! Human-readable output

use std::io::{self, Write};

use webdeploy::config::ConfigWarning;
use webdeploy::{DispatchReport, TaskStatus};

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("⚠ {}", warning);
    }
}

/// Render a dispatch report, one line per task
pub fn write_report<W: Write>(out: &mut W, report: &DispatchReport) -> io::Result<()> {
    writeln!(out, "Publish to '{}':", report.database)?;
    if report.outcomes.is_empty() {
        writeln!(out, "  no deployment tasks registered")?;
    }

    for outcome in &report.outcomes {
        match &outcome.status {
            TaskStatus::Skipped => {
                writeln!(out, "  ○ {} (other database)", outcome.task)?;
            }
            TaskStatus::Succeeded(summary) => {
                writeln!(out, "  ✓ {}: {}", outcome.task, summary)?;
            }
            TaskStatus::Failed(message) => {
                writeln!(out, "  ✗ {}: {}", outcome.task, message)?;
            }
        }
    }

    writeln!(
        out,
        "{} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    )
}

pub fn print_report(report: &DispatchReport) -> io::Result<()> {
    write_report(&mut io::stdout().lock(), report)
}
