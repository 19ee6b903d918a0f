//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use srsgen_common_config::{ConfigLoader, ProjectLayout, SrsConfig};
use srsgen_generate::{Pipeline, RenderContext, Step};

use crate::commands::{audit, generate, InitCommand};
use crate::error::CliError;

/// srsgen - build an IEEE 830 SRS from markdown context files
///
/// Each subcommand regenerates its sections of output/SRS_Draft.md in place.
#[derive(Debug, Parser)]
#[command(
    name = "srsgen",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Project root holding project_context/ and output/
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_hint = ValueHint::DirPath,
        help = "Project root directory"
    )]
    pub root: PathBuf,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "SRSGEN_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Project name used in generated prose
    #[arg(
        long,
        global = true,
        env = "SRS_PROJECT_NAME",
        help = "Project name used in generated prose"
    )]
    pub project_name: Option<String>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed project_context/ with the bundled templates
    Init(InitCommand),

    /// Generate Section 1.0 (Introduction)
    Introduction,

    /// Generate Section 2.0 (Descriptive Modeling)
    Describe,

    /// Generate Section 3.1 (Interface Specification)
    Interfaces,

    /// Generate Section 3.2 (Feature Decomposition)
    Features,

    /// Generate the logic subsections 3.2.2 to 3.2.4
    Logic,

    /// Generate Sections 3.3 to 3.5 (performance, constraints, attributes)
    Attributes,

    /// Audit the SRS and write Audit_Report.md
    Audit,

    /// Run every generation step, then the audit
    All,
}

impl Command {
    /// The generation step behind this subcommand, if it is one.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Introduction => Some(Step::Introduction),
            Self::Describe => Some(Step::Describe),
            Self::Interfaces => Some(Step::Interfaces),
            Self::Features => Some(Step::Features),
            Self::Logic => Some(Step::Logic),
            Self::Attributes => Some(Step::Attributes),
            Self::Init(_) | Self::Audit | Self::All => None,
        }
    }
}

impl Cli {
    /// Load configuration: defaults, then the config file, then the
    /// project-name flag or `SRS_PROJECT_NAME`.
    pub fn load_config(&self) -> Result<SrsConfig, CliError> {
        let mut loader = ConfigLoader::new(&self.root);
        if let Some(path) = &self.config {
            loader = loader.with_file(path);
        }

        let mut config = loader.load()?;
        config.apply_project_name(self.project_name.clone());
        Ok(config)
    }

    /// Execute the selected command
    pub fn execute(self) -> Result<(), CliError> {
        let config = self.load_config()?;
        let ctx = CommandContext {
            layout: config.layout(&self.root),
            config,
            format: self.format,
            quiet: self.quiet,
        };

        match &self.command {
            Command::Init(cmd) => cmd.execute(&ctx),
            Command::Audit => audit::execute(&ctx),
            Command::All => generate::execute_all(&ctx),
            Command::Introduction => generate::execute(&ctx, Step::Introduction),
            Command::Describe => generate::execute(&ctx, Step::Describe),
            Command::Interfaces => generate::execute(&ctx, Step::Interfaces),
            Command::Features => generate::execute(&ctx, Step::Features),
            Command::Logic => generate::execute(&ctx, Step::Logic),
            Command::Attributes => generate::execute(&ctx, Step::Attributes),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: SrsConfig,
    pub layout: ProjectLayout,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    pub fn render_context(&self) -> RenderContext {
        RenderContext::from_config(&self.config)
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.layout.clone(), self.render_context())
    }
}
