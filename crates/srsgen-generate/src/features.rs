//! Section 3.2: Feature Decomposition.
//!
//! One `### 3.2.N` subsection per feature row with a non-empty
//! `Feature Name`. Rows without a name are skipped and do not consume a
//! number.

use srsgen_common_core::{ensure_extracted, Result};
use srsgen_markdown::{extract_rows, split_cell_items, TableRow};
use tracing::info;

use crate::layout::{RenderedSection, SrsSection};

const TREE_NOTE: &str = "- Functional Decomposition Tree Note: Map this branch back to the tree node representing the feature category and ensure all child behaviors are traceable.";

/// IEEE 830 priority class for a `Priority` cell.
pub fn priority_ranking(priority: &str) -> &'static str {
    match priority.trim().to_lowercase().as_str() {
        "high" => "Essential",
        "low" => "Optional",
        _ => "Conditional",
    }
}

/// A parsed feature row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: String,
    pub user_story: String,
    pub priority: &'static str,
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
    pub acceptance: Vec<String>,
}

impl FeatureSpec {
    /// `None` when the row has no feature name.
    pub fn from_row(row: &TableRow) -> Option<Self> {
        let name = row.first_of(&["Feature Name"])?;
        let items = |column: &str| row.get(column).map(split_cell_items).unwrap_or_default();
        Some(Self {
            name: name.to_string(),
            user_story: row.get_or("User Story", "").to_string(),
            priority: priority_ranking(row.get_or("Priority", "")),
            functional: items("Functional Requirements"),
            non_functional: items("Non-Functional Requirements"),
            acceptance: items("Acceptance Criteria"),
        })
    }
}

/// Render Section 3.2 from `features.md` and `quality_standards.md`.
///
/// Fails with an empty-extraction error when no row names a feature.
pub fn render(features: &str, quality: &str) -> Result<RenderedSection> {
    let rows = extract_rows(features);
    info!("Parsed {} feature rows from features.md", rows.len());

    let specs: Vec<FeatureSpec> = rows.iter().filter_map(FeatureSpec::from_row).collect();
    ensure_extracted!(
        !specs.is_empty(),
        "No populated features found; aborting Section 3.2 generation."
    );

    let functional_suitability = quality.contains("Functional Suitability");
    let subsections: Vec<String> = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            info!("Built subsection 3.2.{} for '{}'", i + 1, spec.name);
            feature_subsection(i + 1, spec, functional_suitability)
        })
        .collect();

    Ok(RenderedSection::new(
        SrsSection::FeatureDecomposition,
        subsections.join("\n\n"),
    ))
}

fn feature_subsection(
    index: usize,
    spec: &FeatureSpec,
    functional_suitability: bool,
) -> String {
    let story = match spec.user_story.trim_end_matches('.') {
        "" => "Not provided",
        story => story,
    };
    let clause = if functional_suitability {
        "It addresses the ISO/IEC 25010 Functional Suitability characteristic by ensuring each requirement maps back to measurable behavior."
    } else {
        "Priority ranking confirms the behavior stays aligned with measurable project goals."
    };

    let mut lines = vec![
        format!("### 3.2.{index} {}", spec.name),
        format!("#### 3.2.{index}.1 Description and Priority"),
        format!(
            "{} delivers capabilities described by the stakeholder need: {story}.",
            spec.name
        ),
        format!("Priority classification: {}. {clause}", spec.priority),
        format!("#### 3.2.{index}.2 Stimulus/Response Sequences"),
    ];
    lines.extend(stimulus_lines(spec));
    lines.push(format!("#### 3.2.{index}.3 Functional Requirements"));
    lines.push("- Detailed Requirements:".into());
    lines.extend(functional_lines(spec));
    lines.push("- Error Handling Requirements:".into());
    lines.extend(error_lines(spec));
    lines.push(TREE_NOTE.into());
    lines.join("\n")
}

fn stimulus_lines(spec: &FeatureSpec) -> Vec<String> {
    let base = if spec.user_story.is_empty() {
        format!("A stakeholder requests the {} capability", spec.name)
    } else {
        spec.user_story.trim_end_matches('.').to_string()
    };

    let lines: Vec<String> = spec
        .functional
        .iter()
        .take(2)
        .enumerate()
        .map(|(i, req)| {
            format!(
                "{}. When {base}, the system shall {}.",
                i + 1,
                req.trim_end_matches('.')
            )
        })
        .collect();

    if lines.is_empty() {
        vec![format!(
            "1. When the {} trigger occurs, the system shall perform the documented behavior.",
            spec.name
        )]
    } else {
        lines
    }
}

fn functional_lines(spec: &FeatureSpec) -> Vec<String> {
    if spec.functional.is_empty() {
        return vec!["- The system shall execute the documented capability when activated.".into()];
    }
    spec.functional
        .iter()
        .map(|req| format!("- The system shall {}.", req.trim_end_matches('.')))
        .collect()
}

fn error_lines(spec: &FeatureSpec) -> Vec<String> {
    let mut lines: Vec<String> = if spec.non_functional.is_empty() {
        vec!["- If the primary data service is unreachable, the system shall return Error Code 503.".into()]
    } else {
        spec.non_functional
            .iter()
            .take(2)
            .map(|nfr| format!("- If {}, the system shall return Error Code 503.", nfr.to_lowercase()))
            .collect()
    };
    lines.extend(spec.acceptance.iter().take(2).map(|ac| {
        format!(
            "- If {}, the system shall log the anomaly and notify operations.",
            ac.to_lowercase()
        )
    }));
    lines
}
