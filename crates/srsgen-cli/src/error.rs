//! CLI error handling and formatting.

use std::error::Error as StdError;
use std::process::ExitCode;

use srsgen_common_core::ErrorCategory;
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::prompts::PromptError;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
        hint: Option<String>,
    },

    #[error(transparent)]
    Pipeline(#[from] srsgen_common_core::Error),

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Pipeline(e) => match e.category() {
                ErrorCategory::Input => "E002",
                ErrorCategory::Extraction => "E003",
                ErrorCategory::FileSystem => "E004",
                ErrorCategory::Template => "E005",
                ErrorCategory::Config => "E001",
            },
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Every failure exits with status 1.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::User { hint, .. } => hint.as_deref(),
            Self::Pipeline(e) => match e.category() {
                ErrorCategory::Input => {
                    Some("Run `srsgen init` to seed project_context/, then the generation steps")
                }
                ErrorCategory::Extraction => {
                    Some("Populate the context tables, then re-run the step")
                }
                _ => None,
            },
            Self::Other(_) => None,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Text rendering: `error[CODE]: message`, then the cause chain when
    /// verbose and the hint.
    pub fn format_text(&self, verbose: bool) -> String {
        let mut output = format!("error[{}]: {self}", self.code());

        if verbose {
            let mut source = StdError::source(self);
            while let Some(cause) = source {
                output.push_str(&format!("\n  caused by: {cause}"));
                source = cause.source();
            }
        }

        if let Some(hint) = self.hint() {
            output.push_str(&format!("\nhint: {hint}"));
        }
        output
    }

    /// JSON rendering for `--format json`.
    pub fn format_json(&self) -> String {
        let json = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "hint": self.hint(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.to_string())
    }
}

impl From<srsgen_common_config::ConfigError> for CliError {
    fn from(err: srsgen_common_config::ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .srsgen/config.yaml or the file passed with --config".to_string()),
        }
    }
}

impl From<PromptError> for CliError {
    fn from(err: PromptError) -> Self {
        Self::user_with_hint(
            err.to_string(),
            "Pass --mode maintenance or --mode clean to skip the prompt",
        )
    }
}

/// Report a command result on stderr and map it to an exit code.
pub fn handle_result(result: Result<(), CliError>, format: OutputFormat, verbose: bool) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(code = error.code(), "command failed");
            match format {
                OutputFormat::Json => eprintln!("{}", error.format_json()),
                OutputFormat::Text => eprintln!("{}", error.format_text(verbose)),
            }
            error.exit_code()
        }
    }
}
