//! Error types for srsgen.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for pipeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A context file a step depends on does not exist.
    #[error("Required context file missing: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Parsing produced nothing where at least one item was required.
    #[error("{what}")]
    EmptyExtraction { what: String },

    /// I/O error tied to a path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(String),
}

/// Coarse grouping of errors, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Extraction,
    FileSystem,
    Config,
    Template,
}

impl Error {
    /// Missing required input at `path`.
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    /// Empty extraction with a description of what was expected.
    pub fn empty_extraction(what: impl Into<String>) -> Self {
        Self::EmptyExtraction { what: what.into() }
    }

    /// I/O failure on `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingInput { .. } => ErrorCategory::Input,
            Self::EmptyExtraction { .. } => ErrorCategory::Extraction,
            Self::Io { .. } => ErrorCategory::FileSystem,
            Self::Config(_) => ErrorCategory::Config,
            Self::Template(_) => ErrorCategory::Template,
        }
    }

    /// Whether this is one of the two domain failures (missing input, empty extraction).
    pub fn is_domain_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Input | ErrorCategory::Extraction
        )
    }
}

/// Result type alias using srsgen's Error.
pub type Result<T> = std::result::Result<T, Error>;
