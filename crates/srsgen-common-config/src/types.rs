//! Configuration types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project name used when neither the config file nor the environment sets one.
pub const DEFAULT_PROJECT_NAME: &str = "KampusPad";

/// Large systems the product integrates with, quoted in the scope section.
pub const DEFAULT_ECOSYSTEM: &str = "OCI compute fabric and the Ugandan University Ecosystem";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrsConfig {
    /// Project identity substituted into generated prose.
    pub project: ProjectConfig,
    /// File layout, relative to the project root.
    pub paths: PathsConfig,
}

impl SrsConfig {
    /// Apply a project-name override (CLI flag or `SRS_PROJECT_NAME`).
    pub fn apply_project_name(&mut self, name: Option<String>) {
        if let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            self.project.name = name;
        }
    }

    /// Resolve every configured path against `root`.
    pub fn layout(&self, root: impl AsRef<Path>) -> ProjectLayout {
        let root = root.as_ref().to_path_buf();
        ProjectLayout {
            context_dir: root.join(&self.paths.context_dir),
            output_dir: root.join(&self.paths.output_dir),
            srs_file: root.join(&self.paths.srs_file),
            audit_report: root.join(&self.paths.audit_report),
            root,
        }
    }
}

/// Project identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Product name.
    pub name: String,
    /// External ecosystem the product exchanges data with.
    pub ecosystem: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            ecosystem: DEFAULT_ECOSYSTEM.to_string(),
        }
    }
}

/// File layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the markdown context files.
    pub context_dir: PathBuf,
    /// Directory for generated documents.
    pub output_dir: PathBuf,
    /// The cumulative SRS document.
    pub srs_file: PathBuf,
    /// The audit report, regenerated on every audit run.
    pub audit_report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            context_dir: PathBuf::from("project_context"),
            output_dir: PathBuf::from("output"),
            srs_file: PathBuf::from("output/SRS_Draft.md"),
            audit_report: PathBuf::from("Audit_Report.md"),
        }
    }
}

/// Paths resolved against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub context_dir: PathBuf,
    pub output_dir: PathBuf,
    pub srs_file: PathBuf,
    pub audit_report: PathBuf,
}

impl ProjectLayout {
    /// Location of one context file.
    pub fn context_file(&self, file: ContextFile) -> PathBuf {
        self.context_dir.join(file.file_name())
    }
}

/// The markdown inputs the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFile {
    Vision,
    Glossary,
    TechStack,
    Features,
    QualityStandards,
    BusinessRules,
}

impl ContextFile {
    /// Every context file, in seeding order.
    pub const ALL: [ContextFile; 6] = [
        ContextFile::BusinessRules,
        ContextFile::Features,
        ContextFile::Glossary,
        ContextFile::QualityStandards,
        ContextFile::TechStack,
        ContextFile::Vision,
    ];

    /// File name inside the context directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Vision => "vision.md",
            Self::Glossary => "glossary.md",
            Self::TechStack => "tech_stack.md",
            Self::Features => "features.md",
            Self::QualityStandards => "quality_standards.md",
            Self::BusinessRules => "business_rules.md",
        }
    }
}
