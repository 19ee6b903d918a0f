//! Section 1.0: Introduction.

use srsgen_markdown::{extract_bullets, extract_rows, first_non_empty_line, Document, TableRow};
use tracing::info;

use crate::context::RenderContext;
use crate::layout::{RenderedSection, SrsSection};

const PROBLEM_STATEMENT: &str = "## 1. Problem Statement";
const SYSTEM_CONSTRAINTS: &str = "## System Constraints";
const STAKEHOLDER_NEEDS: &str = "## Stakeholder Needs (ISO/IEC 1233)";

const STANDARDS: [&str; 8] = [
    "IEEE Std 830-1998: Software Requirements Specifications",
    "IEEE Std 1233-1998: System Requirements Development",
    "IEEE Std 610.12-1990: Software Engineering Terminology",
    "ASTM E1340-96: Rapid Prototyping of Computerized Systems",
    "US ISO/IEC 25010: Systems and Software Quality Requirements and Evaluation (SQuaRE) - Quality Model",
    "US ISO/IEC 25023: Systems and Software Quality Requirements and Evaluation (SQuaRE) - Measurement of System and Software Product Quality",
    "US ISO/IEC 25051: Systems and Software Engineering - Requirements for Procuring Off-the-Shelf Software",
    "US ISO/IEC 15504-1: Information Technology — Process Assessment - Concepts and Terminology",
];

/// Render Section 1.0 from `vision.md` and `glossary.md`.
pub fn render(ctx: &RenderContext, vision: &str, glossary: &str) -> RenderedSection {
    let doc = Document::parse(vision);
    let problem = doc.extract(PROBLEM_STATEMENT);
    let constraints = doc.extract(SYSTEM_CONSTRAINTS);
    let stakeholders = extract_rows(&doc.extract(STAKEHOLDER_NEEDS));
    let constraint_bullets = extract_bullets(&constraints);
    let definitions = extract_rows(glossary);

    info!("Parsed {} stakeholder entries.", stakeholders.len());
    info!("Parsed {} system constraint bullets.", constraint_bullets.len());
    info!("Parsed {} glossary definitions.", definitions.len());

    let body = format!(
        "The following section captures the formal introduction that guides the IEEE/ISO SRS downstream work.\n\n\
         ## 1.1 Purpose\n{}\n\n\
         ## 1.2 Scope\n{}\n\n\
         ## 1.3 Definitions, Acronyms, and Abbreviations\n{}\n\n\
         ## 1.4 References\n{}\n\n\
         ## 1.5 Overview\n{}",
        purpose(ctx, &problem, &constraints),
        scope(ctx, &stakeholders, &constraint_bullets),
        definitions_table(&definitions),
        references(),
        overview(),
    );
    RenderedSection::new(SrsSection::Introduction, body)
}

fn purpose(ctx: &RenderContext, problem: &str, constraints: &str) -> String {
    let problem = problem.replace("**", "");
    let business = match first_non_empty_line(&problem) {
        "" => "addresses the business intent documented in vision.md.",
        line => line,
    };
    let constraints = constraints.replace("**", "");
    let technical = first_non_empty_line(&constraints);

    let mut lines = vec![
        format!("{} provides the platform that {}", ctx.project_name, business),
        "This SRS records the requirements for Version 1.0, enabling developers, testers, and stakeholders to agree on behavior, quality criteria, and traceability links.".to_string(),
    ];
    if !technical.is_empty() {
        lines.push(format!(
            "Technical scope is limited to the infrastructure, APIs, and governance processes described in System Constraints: {technical}."
        ));
    }
    lines.push("Business intent statements originate from the Problem Statement block, while Technical Scope statements come from the System Constraints section; each scope item remains traceable to that Stakeholder Needs table.".to_string());
    lines.join("\n")
}

fn scope(ctx: &RenderContext, stakeholders: &[TableRow], constraints: &[String]) -> String {
    let mut items: Vec<String> = stakeholders
        .iter()
        .filter_map(|row| {
            let stakeholder = row
                .first_of(&["Stakeholder", "Stakeholder Group"])
                .unwrap_or("Stakeholder");
            let need = row.first_of(&["Need", "Primary Concerns", "Key Roles"])?;
            Some(format!("- Deliver capabilities that satisfy {stakeholder} by {need}."))
        })
        .collect();

    items.extend(
        constraints
            .iter()
            .map(|c| format!("- Respect the constraint that {c} (per System Constraints).")),
    );
    if items.is_empty() {
        items.push("- Scope details will be populated once stakeholder needs and system constraints are clarified.".to_string());
    }
    items.push(format!(
        "- Integrate {} with {} so the platform can exchange data with university ecosystems and OCI-hosted services.",
        ctx.project_name, ctx.ecosystem
    ));
    items.push("- Traceability is maintained by linking each item to the Stakeholder Needs table in vision.md.".to_string());
    items.join("\n")
}

fn definitions_table(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return "| Term | Definition |\n|------|------------|\n| TBD | Definitions will be inserted once glossary is populated. |".to_string();
    }
    let mut lines = vec![
        "| Term | Definition |".to_string(),
        "|------|------------|".to_string(),
    ];
    for row in rows {
        if let (Some(term), Some(definition)) = (row.first_of(&["Term"]), row.first_of(&["Definition"])) {
            lines.push(format!("| {term} | {definition} |"));
        }
    }
    lines.join("\n")
}

fn references() -> String {
    let mut lines: Vec<String> = STANDARDS.iter().map(|s| format!("- {s}")).collect();
    lines.push("- Project context files: vision.md, glossary.md, quality_standards.md".to_string());
    lines.join("\n")
}

fn overview() -> &'static str {
    "Section 2.0 will document the system description and user needs.\n\
     Section 3.0 will cover specific system features converted from the Feature Set template.\n\
     Sections 4.0 through 8.0 will address interfaces, requirements, non-functional constraints, validation, and traceability matrices.\n\
     The roadmap reinforces the IEEE Std 830 structure and keeps the team aligned."
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISION: &str = "\
# Vision

## 1. Problem Statement
**Universities** lose track of tutoring sessions across campuses.

## System Constraints
- Must run on OCI Always Free tier
- Must tolerate power loss

## Stakeholder Needs (ISO/IEC 1233)
| Stakeholder | Need |
|-------------|------|
| Registrar | auditable session records |
| Tutor | |
";

    const GLOSSARY: &str = "\
| Term | Definition |
|------|------------|
| SRS | Software Requirements Specification |
| RTM | |
";

    fn ctx() -> RenderContext {
        RenderContext::new("Tutorly", "the campus ERP")
    }

    #[test]
    fn test_purpose_uses_problem_and_constraints() {
        let section = render(&ctx(), VISION, GLOSSARY);
        assert!(section.body.contains(
            "Tutorly provides the platform that Universities lose track of tutoring sessions across campuses.\n"
        ));
        assert!(section.body.contains(
            "described in System Constraints: - Must run on OCI Always Free tier."
        ));
    }

    #[test]
    fn test_scope_items() {
        let section = render(&ctx(), VISION, GLOSSARY);
        let body = &section.body;
        assert!(body.contains("- Deliver capabilities that satisfy Registrar by auditable session records."));
        assert!(!body.contains("satisfy Tutor"));
        assert!(body.contains("- Respect the constraint that Must tolerate power loss (per System Constraints)."));
        assert!(body.contains("- Integrate Tutorly with the campus ERP so the platform"));
        assert!(body.trim_end().ends_with("keeps the team aligned."));
    }

    #[test]
    fn test_scope_placeholder_when_vision_is_bare() {
        let section = render(&ctx(), "# Vision\n", "");
        assert!(section.body.contains("- Scope details will be populated once stakeholder needs"));
        assert!(section.body.contains("the platform that addresses the business intent documented in vision.md."));
        assert!(!section.body.contains("Technical scope is limited"));
        assert!(section.body.contains("| TBD | Definitions will be inserted once glossary is populated. |"));
    }

    #[test]
    fn test_definitions_skip_incomplete_rows() {
        let table = definitions_table(&extract_rows(GLOSSARY));
        assert_eq!(
            table,
            "| Term | Definition |\n|------|------------|\n| SRS | Software Requirements Specification |"
        );
    }

    #[test]
    fn test_subsection_order() {
        let body = render(&ctx(), VISION, GLOSSARY).body;
        let positions: Vec<_> = ["## 1.1", "## 1.2", "## 1.3", "## 1.4", "## 1.5"]
            .iter()
            .map(|h| body.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(body.matches("- IEEE Std").count(), 3);
    }
}
