//! Values substituted into generated prose.

use serde::Serialize;
use srsgen_common_config::SrsConfig;

/// Project-wide values every renderer receives explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Product name.
    pub project_name: String,
    /// External ecosystem the product integrates with.
    pub ecosystem: String,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>, ecosystem: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ecosystem: ecosystem.into(),
        }
    }

    pub fn from_config(config: &SrsConfig) -> Self {
        Self::new(&config.project.name, &config.project.ecosystem)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&SrsConfig::default())
    }
}
