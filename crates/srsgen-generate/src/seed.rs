//! Context-template seeding for `srsgen init`.
//!
//! Templates are bundled into the binary and rendered with Handlebars so the
//! configured project name appears in the seeded files.

use std::path::PathBuf;

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use srsgen_common_config::{ContextFile, ProjectLayout};
use srsgen_common_core::{Error, Result};
use srsgen_common_fs::{ensure_dir, path::display_relative, remove_dir_if_exists, write_if_absent};
use tracing::info;

use crate::context::RenderContext;

/// How an existing context directory is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Add missing templates, keep existing files.
    #[default]
    Maintenance,
    /// Delete the context directory and rebuild it.
    Clean,
}

/// What a seeding run did. Paths are relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub mode: SeedMode,
    pub cleaned: bool,
    pub created: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

fn template_source(file: ContextFile) -> &'static str {
    match file {
        ContextFile::BusinessRules => include_str!("../templates/business_rules.md.hbs"),
        ContextFile::Features => include_str!("../templates/features.md.hbs"),
        ContextFile::Glossary => include_str!("../templates/glossary.md.hbs"),
        ContextFile::QualityStandards => include_str!("../templates/quality_standards.md.hbs"),
        ContextFile::TechStack => include_str!("../templates/tech_stack.md.hbs"),
        ContextFile::Vision => include_str!("../templates/vision.md.hbs"),
    }
}

/// Renders the bundled context templates.
pub struct ContextSeeder {
    handlebars: Handlebars<'static>,
    ctx: RenderContext,
}

impl ContextSeeder {
    pub fn new(ctx: RenderContext) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);

        for file in ContextFile::ALL {
            handlebars
                .register_template_string(file.file_name(), template_source(file))
                .map_err(|e| Error::template(format!("{}: {e}", file.file_name())))?;
        }

        Ok(Self { handlebars, ctx })
    }

    /// Rendered content of one context file.
    pub fn render(&self, file: ContextFile) -> Result<String> {
        self.handlebars
            .render(file.file_name(), &self.ctx)
            .map_err(|e| Error::template(format!("{}: {e}", file.file_name())))
    }

    /// Seed the context directory and create the output directory.
    pub fn seed(&self, layout: &ProjectLayout, mode: SeedMode) -> Result<SeedReport> {
        let mut report = SeedReport {
            mode,
            output_dir: display_relative(&layout.output_dir, &layout.root),
            ..Default::default()
        };

        if mode == SeedMode::Clean && remove_dir_if_exists(&layout.context_dir)? {
            report.cleaned = true;
            info!(
                "Cleaned {}; rebuilding templates.",
                display_relative(&layout.context_dir, &layout.root).display()
            );
        }

        ensure_dir(&layout.context_dir)?;
        ensure_dir(&layout.output_dir)?;

        for file in ContextFile::ALL {
            let target = layout.context_file(file);
            let shown = display_relative(&target, &layout.root);
            if write_if_absent(&target, &self.render(file)?)? {
                info!("Created {}.", shown.display());
                report.created.push(shown);
            } else {
                info!("Keeping existing {} (already present).", file.file_name());
                report.kept.push(shown);
            }
        }

        Ok(report)
    }
}
