//! Section generation commands.

use srsgen_common_log::spans::{record_error, step_span};
use srsgen_common_log::timed;
use srsgen_generate::{Step, StepReport};

use crate::cli::CommandContext;
use crate::commands::audit;
use crate::error::CliError;
use crate::output::{print_output, RunOutput};

fn run_step(ctx: &CommandContext, step: Step) -> Result<StepReport, CliError> {
    let _span = step_span(step.name()).entered();
    let report = timed!("step", ctx.pipeline().run(step)).inspect_err(|e| record_error(e))?;
    Ok(report)
}

/// Run one generation step.
pub fn execute(ctx: &CommandContext, step: Step) -> Result<(), CliError> {
    let report = run_step(ctx, step)?;
    print_output(ctx, &report)
}

/// Run every generation step in order, then the audit. Stops at the first
/// failure; sections already written stay in place.
pub fn execute_all(ctx: &CommandContext) -> Result<(), CliError> {
    let steps = Step::ALL
        .iter()
        .map(|&step| run_step(ctx, step))
        .collect::<Result<Vec<_>, _>>()?;
    let audit = audit::run(ctx)?;

    print_output(ctx, &RunOutput { steps, audit })
}
