//! Step execution against a project layout.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use srsgen_common_config::{ContextFile, ProjectLayout};
use srsgen_common_core::Result;
use srsgen_common_fs::{ensure_dir, path::display_relative, read_optional, read_required, write_string_atomic};
use srsgen_markdown::Document;
use tracing::{debug, info};

use crate::context::RenderContext;
use crate::layout::{splice_section, splice_subsection, RenderedSection, RenderedSubsection};
use crate::{attributes, descriptive, features, interfaces, intro, logic};

/// A section-generating step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Introduction,
    Describe,
    Interfaces,
    Features,
    Logic,
    Attributes,
}

impl Step {
    /// Every step, in the order `all` runs them.
    pub const ALL: [Step; 6] = [
        Step::Introduction,
        Step::Describe,
        Step::Interfaces,
        Step::Features,
        Step::Logic,
        Step::Attributes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Describe => "describe",
            Self::Interfaces => "interfaces",
            Self::Features => "features",
            Self::Logic => "logic",
            Self::Attributes => "attributes",
        }
    }

    /// Context files the step requires.
    pub fn inputs(&self) -> &'static [ContextFile] {
        use ContextFile::*;
        match self {
            Self::Introduction => &[Vision, Glossary],
            Self::Describe | Self::Interfaces => &[TechStack, Features, QualityStandards],
            Self::Features => &[Features, QualityStandards],
            Self::Logic => &[BusinessRules, TechStack, QualityStandards],
            Self::Attributes => &[QualityStandards, TechStack],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: Step,
    /// Heading lines written, in order.
    pub sections: Vec<String>,
    /// SRS document, relative to the project root.
    pub output: PathBuf,
}

impl StepReport {
    /// One-line status for the terminal.
    pub fn summary(&self) -> String {
        let names: Vec<&str> = self
            .sections
            .iter()
            .map(|h| h.trim_start_matches(['#', ' ']))
            .collect();
        format!("Updated {} with {}", self.output.display(), names.join(", "))
    }
}

enum Rendered {
    Sections(Vec<RenderedSection>),
    Subsections(Vec<RenderedSubsection>),
}

struct Inputs(HashMap<ContextFile, String>);

impl Inputs {
    fn get(&self, file: ContextFile) -> &str {
        self.0.get(&file).map(String::as_str).unwrap_or_default()
    }
}

/// Runs steps for one project.
#[derive(Debug, Clone)]
pub struct Pipeline {
    layout: ProjectLayout,
    ctx: RenderContext,
}

impl Pipeline {
    pub fn new(layout: ProjectLayout, ctx: RenderContext) -> Self {
        Self { layout, ctx }
    }

    /// Run one step: read every input, render, then splice into the SRS.
    ///
    /// Nothing is written unless all inputs exist and rendering succeeds.
    pub fn run(&self, step: Step) -> Result<StepReport> {
        let inputs = self.read_inputs(step)?;
        let rendered = self.render(step, &inputs)?;

        ensure_dir(&self.layout.output_dir)?;
        let existing = read_optional(&self.layout.srs_file)?.unwrap_or_default();
        let mut doc = Document::parse(&existing);

        let sections: Vec<String> = match &rendered {
            Rendered::Sections(sections) => {
                for section in sections {
                    splice_section(&mut doc, section)?;
                }
                sections.iter().map(|s| s.section.heading().to_string()).collect()
            }
            Rendered::Subsections(subsections) => {
                for subsection in subsections {
                    splice_subsection(&mut doc, subsection)?;
                }
                subsections
                    .iter()
                    .map(|s| s.subsection.heading().to_string())
                    .collect()
            }
        };

        write_string_atomic(&self.layout.srs_file, &doc.to_markdown())?;
        let output = display_relative(&self.layout.srs_file, &self.layout.root);
        info!("Wrote {} section(s) to {}", sections.len(), output.display());

        Ok(StepReport {
            step,
            sections,
            output,
        })
    }

    fn read_inputs(&self, step: Step) -> Result<Inputs> {
        let mut inputs = HashMap::new();
        for &file in step.inputs() {
            let text = read_required(&self.layout.root, self.layout.context_file(file))?;
            inputs.insert(file, text);
        }
        Ok(Inputs(inputs))
    }

    fn render(&self, step: Step, inputs: &Inputs) -> Result<Rendered> {
        use ContextFile::*;
        debug!("Rendering step {}", step);

        let rendered = match step {
            Step::Introduction => Rendered::Sections(vec![intro::render(
                &self.ctx,
                inputs.get(Vision),
                inputs.get(Glossary),
            )]),
            Step::Describe => Rendered::Sections(vec![descriptive::render(
                &self.ctx,
                inputs.get(TechStack),
                inputs.get(Features),
                inputs.get(QualityStandards),
            )]),
            Step::Interfaces => Rendered::Sections(vec![interfaces::render(
                &self.ctx,
                inputs.get(TechStack),
                inputs.get(Features),
                inputs.get(QualityStandards),
            )]),
            Step::Features => Rendered::Sections(vec![features::render(
                inputs.get(Features),
                inputs.get(QualityStandards),
            )?]),
            Step::Logic => Rendered::Subsections(logic::render(
                inputs.get(BusinessRules),
                inputs.get(TechStack),
                inputs.get(QualityStandards),
            )),
            Step::Attributes => Rendered::Sections(attributes::render(
                inputs.get(QualityStandards),
                inputs.get(TechStack),
            )),
        };
        Ok(rendered)
    }
}
