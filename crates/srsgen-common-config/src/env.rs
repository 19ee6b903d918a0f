//! Environment variable handling.

use std::path::Path;

use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load {file}: {source}")]
    Dotenv {
        file: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Dotenv files read at startup, highest precedence first.
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Environment configuration.
pub struct Environment {
    loaded: Vec<String>,
}

impl Environment {
    /// Load `.env.local` and `.env` from the working directory.
    pub fn init() -> Result<Self, EnvError> {
        Self::init_in(".")
    }

    /// Load dotenv files from `dir`. Variables already set are never
    /// overwritten, so the process environment wins over `.env.local`, which
    /// wins over `.env`. Missing files are skipped.
    pub fn init_in(dir: impl AsRef<Path>) -> Result<Self, EnvError> {
        let mut loaded = Vec::new();
        for file in DOTENV_FILES {
            match dotenvy::from_filename(dir.as_ref().join(file)) {
                Ok(_) => loaded.push(file.to_string()),
                Err(e) if e.not_found() => {}
                Err(source) => {
                    return Err(EnvError::Dotenv {
                        file: file.to_string(),
                        source,
                    })
                }
            }
        }
        Ok(Self { loaded })
    }

    /// Dotenv files that were found and applied.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}
