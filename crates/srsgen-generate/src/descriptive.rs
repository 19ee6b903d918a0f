//! Section 2.0: Descriptive Modeling.

use srsgen_markdown::{extract_rows, mentions, KeywordMatches, KeywordSet, TableRow};
use tracing::info;

use crate::context::RenderContext;
use crate::layout::{RenderedSection, SrsSection};

/// Capability groups, first match wins. Features matching none land in
/// [`GENERAL_CAPABILITIES`].
pub const CAPABILITY_GROUPS: [(&str, &[&str]); 4] = [
    ("Verification & Traceability", &["traceability", "requirements"]),
    ("Maintenance & Operations", &["maintenance", "seeder", "documentation"]),
    ("Performance & Alerting", &["performance", "alert"]),
    ("Stakeholder Compliance", &["fit", "sign-off", "workflow"]),
];

pub const GENERAL_CAPABILITIES: &str = "General Capabilities";

const PERSONAS: [(&str, &str); 3] = [
    ("System Admin", "Expert-level proficiency with OCI console, Linux shell, and configuration enforcement tasks."),
    ("End User", "Proficient with browser-based dashboards and able to interpret traceability reports with minimal training."),
    ("QA Lead", "Comfortable assessing requirement/test linkage and verifying Fit Criteria through provided dashboards."),
];

/// Features grouped by capability, in group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityGroups {
    groups: Vec<(&'static str, Vec<String>)>,
}

impl CapabilityGroups {
    /// Group the `Feature Name` of every row.
    pub fn from_rows(rows: &[TableRow]) -> Self {
        let mut groups: Vec<(&'static str, Vec<String>)> = CAPABILITY_GROUPS
            .iter()
            .map(|(name, _)| (*name, Vec::new()))
            .chain(std::iter::once((GENERAL_CAPABILITIES, Vec::new())))
            .collect();

        for row in rows {
            let name = row.get_or("Feature Name", "Unknown Feature");
            let lower = name.to_lowercase();
            let index = CAPABILITY_GROUPS
                .iter()
                .position(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
                .unwrap_or(CAPABILITY_GROUPS.len());
            groups[index].1.push(name.to_string());
        }

        Self { groups }
    }

    /// Features in `group`.
    pub fn features(&self, group: &str) -> &[String] {
        self.groups
            .iter()
            .find(|(name, _)| *name == group)
            .map(|(_, features)| features.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty groups in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .filter(|(_, features)| !features.is_empty())
            .map(|(name, features)| (*name, features.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Render Section 2.0 from `tech_stack.md`, `features.md` and
/// `quality_standards.md`.
pub fn render(ctx: &RenderContext, tech_stack: &str, features: &str, quality: &str) -> RenderedSection {
    let infra = KeywordSet::infrastructure().detect_lines(tech_stack);
    let rows = extract_rows(features);
    info!("Parsed {} feature rows.", rows.len());

    let groups = CapabilityGroups::from_rows(&rows);
    for (capability, names) in groups.iter() {
        info!("Capability '{}' includes: {}", capability, names.join(", "));
    }

    let body = [
        product_perspective(ctx, &infra),
        product_functions(&groups),
        user_characteristics(),
        constraints(quality),
        assumptions_dependencies(),
    ]
    .join("\n\n");

    RenderedSection::new(SrsSection::DescriptiveModeling, body)
}

fn product_perspective(ctx: &RenderContext, infra: &KeywordMatches) -> String {
    let mut lines: Vec<String> = vec![
        "### 2.1 Product Perspective".into(),
        "#### System Interfaces".into(),
    ];

    lines.push(if infra.contains("OCI") {
        "- OCI compute nodes and networking are referenced as the primary hosting fabric; the system communicates with OCI-managed services via HTTPS APIs and private peering.".into()
    } else {
        "- Primary hosting fabric is the configured on-premise environment plus documented third-party platforms.".into()
    });
    if infra.contains("MySQL") {
        lines.push("- System interfaces include a MySQL 8.0 instance optimized for concurrency and row-level security.".into());
    } else if infra.contains("PostgreSQL") {
        lines.push("- System interfaces include PostgreSQL 16.1 with synchronous replication for data services.".into());
    }

    lines.push("#### User Interfaces".into());
    lines.push("- Web-based dashboards provide traceability visibility, Fit Criteria reporting, and workflow controls for stakeholders and QA leads.".into());
    lines.push("- Role-based UI flows present limited operations per persona (admin, reviewer, operator).".into());

    lines.push("#### Hardware Interfaces".into());
    if infra.contains("HP Z440") {
        lines.push("- HP Z440 workstations host governance tooling; connectors expose USB/serial for local instrumentation.".into());
    }
    if infra.contains("TPM") {
        lines.push("- TPM 2.0 modules on the hardware provide secure boot and key storage.".into());
    }
    if infra.contains("NVMe") {
        lines.push("- NVMe SSDs meet storage throughput requirements, delivering the write endurance noted in tech_stack.md.".into());
    }

    lines.push("#### Memory Constraints".into());
    match infra.lines("RAM").first() {
        Some(line) => lines.push(format!("- RAM constraints follow the stated requirement: {line}.")),
        None => lines.push("- Memory key points were not explicitly captured; maintain at least 32 GB ECC for production nodes.".into()),
    }

    lines.push("#### System Block Diagram Description".into());
    lines.push(format!(
        "- The diagram represents users interacting with the {} portal, leading into the application layer (authentication, requirement tracking, traceability), which connects via secure APIs to data services (MySQL/Postgres) and monitoring nodes hosted on OCI or HP Z440 hardware.",
        ctx.project_name
    ));
    lines.join("\n")
}

fn product_functions(groups: &CapabilityGroups) -> String {
    let mut lines = vec!["### 2.2 Product Functions".to_string()];
    for (capability, features) in groups.iter() {
        lines.push(format!("- {capability}:"));
        lines.extend(features.iter().map(|f| format!("  - {f}")));
    }
    if groups.is_empty() {
        lines.push("- Product functions will be detailed once additional feature documentation is provided.".into());
    }
    lines.join("\n")
}

fn user_characteristics() -> String {
    let mut lines = vec!["### 2.3 User Characteristics".to_string()];
    lines.extend(PERSONAS.iter().map(|(persona, proficiency)| format!("- {persona}: {proficiency}")));
    lines.join("\n")
}

fn constraints(quality: &str) -> String {
    let mut lines = vec![
        "### 2.4 Constraints",
        "- ISO/IEC 25051 mandates ready-to-use software; the platform SHALL deliver fully packaged deployments with documented configuration tables and no custom build steps.",
        "- Local environmental factors (intermittent power and variable internet stability in Uganda) REQUIRE offline logging, resume capabilities, and tolerance for reconnecting workflows.",
    ];
    if mentions(quality, "portability") {
        lines.push("- Portability requirements demand documented deployment rehearsals within 45 minutes to prove transferability.");
    }
    lines.join("\n")
}

fn assumptions_dependencies() -> String {
    [
        "### 2.5 Assumptions and Dependencies",
        "- Assumes OCI compute fabric or HP Z440 hardware remains available for deployment; any change triggers a new infrastructure review.",
        "- Depends on MySQL 8.0 (or PostgreSQL 16.1) with row-level security and synchronous replication to satisfy data consistency.",
        "- Relies on readily available monitoring and logging suites referenced in quality_standards.md for traceability and security checks.",
        "- Assumes power/internet resilience plans include UPS backups and scheduled maintenance notifications.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TECH: &str = "\
# Tech Stack
- Hosting: OCI VM.Standard.E3.Flex
- Database: PostgreSQL 16.1
- Workstation: HP Z440 with TPM 2.0
- Memory: 64 GB ECC RAM per node
";

    const FEATURES: &str = "\
| Feature Name | Priority |
|--------------|----------|
| Requirements Traceability Matrix | high |
| Documentation Seeder | medium |
| Offline Sync | low |
";

    #[test_case("Requirements Traceability Matrix", "Verification & Traceability" ; "traceability")]
    #[test_case("Context Seeder", "Maintenance & Operations" ; "seeder")]
    #[test_case("Latency Alert Hub", "Performance & Alerting" ; "alert")]
    #[test_case("Sign-off Workflow", "Stakeholder Compliance" ; "workflow")]
    #[test_case("Offline Sync", "General Capabilities" ; "fallback")]
    fn test_capability_grouping(feature: &str, group: &str) {
        let rows = vec![TableRow::from_pairs([("Feature Name", feature)])];
        let groups = CapabilityGroups::from_rows(&rows);
        assert_eq!(groups.features(group), [feature.to_string()]);
    }

    #[test]
    fn test_product_functions_lists_non_empty_groups() {
        let section = render(&RenderContext::default(), TECH, FEATURES, "");
        assert!(section.body.contains(
            "### 2.2 Product Functions\n\
             - Verification & Traceability:\n  - Requirements Traceability Matrix\n\
             - Maintenance & Operations:\n  - Documentation Seeder\n\
             - General Capabilities:\n  - Offline Sync\n\n"
        ));
        assert!(!section.body.contains("Performance & Alerting"));
    }

    #[test]
    fn test_infrastructure_sentences() {
        let section = render(&RenderContext::new("Tutorly", "x"), TECH, FEATURES, "");
        let body = &section.body;
        assert!(body.contains("- OCI compute nodes and networking"));
        assert!(body.contains("PostgreSQL 16.1 with synchronous replication"));
        assert!(body.contains("- HP Z440 workstations host governance tooling"));
        assert!(body.contains("- TPM 2.0 modules"));
        assert!(!body.contains("- NVMe SSDs"));
        assert!(body.contains("- RAM constraints follow the stated requirement: - Memory: 64 GB ECC RAM per node."));
        assert!(body.contains("interacting with the Tutorly portal"));
    }

    #[test]
    fn test_defaults_without_infrastructure() {
        let section = render(&RenderContext::default(), "# Tech Stack\nprogram notes\n", "", "");
        let body = &section.body;
        assert!(body.contains("- Primary hosting fabric is the configured on-premise environment"));
        assert!(body.contains("maintain at least 32 GB ECC for production nodes."));
        assert!(body.contains("- Product functions will be detailed once additional feature documentation is provided."));
    }

    #[test]
    fn test_portability_constraint() {
        let with = render(&RenderContext::default(), TECH, FEATURES, "| Portability | 45 min |");
        let without = render(&RenderContext::default(), TECH, FEATURES, "");
        assert!(with.body.contains("within 45 minutes"));
        assert!(!without.body.contains("within 45 minutes"));
        assert!(with.body.ends_with("scheduled maintenance notifications."));
    }
}
