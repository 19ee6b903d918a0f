//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::SrsConfig;

/// Directory, relative to the project root, holding the config file.
pub const CONFIG_DIR: &str = ".srsgen";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env reference pattern is valid")
});

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
            explicit: None,
        }
    }

    /// Read from `path` instead of `.srsgen/config.yaml`. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit = Some(path.as_ref().to_path_buf());
        self
    }

    /// The file this loader reads and writes.
    pub fn config_path(&self) -> PathBuf {
        match &self.explicit {
            Some(path) => path.clone(),
            None => self.base_path.join(CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(&self) -> Result<SrsConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            if self.explicit.is_some() {
                return Err(ConfigError::NotFound { path: config_path });
            }
            return Ok(SrsConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        // An empty file is a valid "all defaults" config
        if expanded.trim().is_empty() {
            return Ok(SrsConfig::default());
        }

        let config: SrsConfig = serde_yaml::from_str(&expanded).map_err(|e| {
            ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            }
        })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_REF.captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &SrsConfig) -> Result<(), ConfigError> {
        if config.project.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "project.name must not be empty".to_string(),
            });
        }

        let paths = [
            ("paths.context_dir", &config.paths.context_dir),
            ("paths.output_dir", &config.paths.output_dir),
            ("paths.srs_file", &config.paths.srs_file),
            ("paths.audit_report", &config.paths.audit_report),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{key} must not be empty"),
                });
            }
        }

        Ok(())
    }
}
