//! Audit command.

use srsgen_common_fs::path::display_relative;
use srsgen_common_log::{spans::step_span, timed};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, AuditOutput};

pub(crate) fn run(ctx: &CommandContext) -> Result<AuditOutput, CliError> {
    let _span = step_span("audit").entered();
    let report = timed!("audit", srsgen_audit::run_audit(&ctx.layout))?;

    Ok(AuditOutput {
        report: display_relative(&ctx.layout.audit_report, &ctx.layout.root),
        summary: report.summary(),
    })
}

/// Audit the SRS and write the report.
pub fn execute(ctx: &CommandContext) -> Result<(), CliError> {
    let output = run(ctx)?;
    print_output(ctx, &output)
}
