//! Init command implementation.

use clap::{Parser, ValueEnum};
use srsgen_common_fs::path::display_relative;
use srsgen_common_log::spans::step_span;
use srsgen_generate::{ContextSeeder, SeedMode};
use tracing::debug;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_output;
use crate::prompts;

/// Seed project_context/ with the bundled templates
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// How to treat an existing project_context/ (prompts when omitted on a terminal)
    #[arg(long, value_enum)]
    pub mode: Option<InitMode>,
}

/// `--mode` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitMode {
    /// Keep existing files, add missing templates
    Maintenance,
    /// Delete the context directory and rebuild it
    Clean,
}

impl From<InitMode> for SeedMode {
    fn from(mode: InitMode) -> Self {
        match mode {
            InitMode::Maintenance => SeedMode::Maintenance,
            InitMode::Clean => SeedMode::Clean,
        }
    }
}

impl InitCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let _span = step_span("init").entered();

        let mode = self.resolve_mode(ctx)?;
        debug!(?mode, "Seeding context templates");

        let report = ContextSeeder::new(ctx.render_context())?.seed(&ctx.layout, mode)?;
        print_output(ctx, &report)
    }

    fn resolve_mode(&self, ctx: &CommandContext) -> Result<SeedMode, CliError> {
        if let Some(mode) = self.mode {
            return Ok(mode.into());
        }
        if !ctx.layout.context_dir.is_dir() || !prompts::is_interactive() {
            return Ok(SeedMode::default());
        }

        let shown = display_relative(&ctx.layout.context_dir, &ctx.layout.root);
        let mode = prompts::choose_seed_mode(
            std::io::stdin().lock(),
            std::io::stderr(),
            &format!("{}/", shown.display()),
        )?;
        Ok(mode)
    }
}
