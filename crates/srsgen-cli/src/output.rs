//! Output formatting utilities for CLI commands.

use std::path::PathBuf;

use serde::Serialize;
use srsgen_audit::{AuditSummary, Verdict};
use srsgen_generate::{SeedMode, SeedReport, StepReport};

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Types printed as the final status of a command
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout. Text output is suppressed by `--quiet`.
pub fn print_output<T: FormattedOutput>(ctx: &CommandContext, value: &T) -> Result<(), CliError> {
    let output = match ctx.format {
        OutputFormat::Text if ctx.quiet => return Ok(()),
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json().map_err(|e| {
            CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}"))
        })?,
    };

    println!("{output}");
    Ok(())
}

impl FormattedOutput for StepReport {
    fn format_text(&self) -> String {
        self.summary()
    }
}

impl FormattedOutput for SeedReport {
    fn format_text(&self) -> String {
        let mode = match self.mode {
            SeedMode::Maintenance => "maintenance",
            SeedMode::Clean => "clean",
        };
        let mut lines = vec![format!(
            "Seeded {} context file(s), kept {} ({mode} mode)",
            self.created.len(),
            self.kept.len()
        )];
        lines.extend(self.created.iter().map(|p| format!("  + {}", p.display())));
        lines.push(format!("Output directory: {}", self.output_dir.display()));
        lines.join("\n")
    }
}

/// Result of an audit run
#[derive(Debug, Serialize)]
pub struct AuditOutput {
    pub report: PathBuf,
    #[serde(flatten)]
    pub summary: AuditSummary,
}

impl FormattedOutput for AuditOutput {
    fn format_text(&self) -> String {
        let failing = self
            .summary
            .verdicts
            .iter()
            .filter(|v| v.verdict == Verdict::Fail)
            .map(|v| v.dimension)
            .collect::<Vec<_>>();

        let mut text = format!(
            "Wrote audit report to {} ({} requirements",
            self.report.display(),
            self.summary.requirements
        );
        if failing.is_empty() {
            text.push_str(", all checks pass)");
        } else {
            text.push_str(&format!(", failing: {})", failing.join(", ")));
        }
        text
    }
}

/// Result of `srsgen all`
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub steps: Vec<StepReport>,
    pub audit: AuditOutput,
}

impl FormattedOutput for RunOutput {
    fn format_text(&self) -> String {
        let mut lines: Vec<String> = self.steps.iter().map(StepReport::summary).collect();
        lines.push(self.audit.format_text());
        lines.join("\n")
    }
}
