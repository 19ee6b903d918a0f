//! Sections 3.3 to 3.5: performance requirements, design constraints and
//! software system attributes, mapped from the quality characteristics.

use std::sync::LazyLock;

use regex::Regex;
use srsgen_markdown::{detect_environment, extract_rows, parse_tables, TableRow};
use tracing::info;

use crate::layout::{RenderedSection, SrsSection};

static TIME_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(<=|<|≤|≥|>|=)?\s*(\d+(?:\.\d+)?)\s*(ms|seconds?|s)\b")
        .expect("time target pattern is valid")
});

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percentage pattern is valid"));

static MTBF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:hours|hrs|h)\b").expect("MTBF pattern is valid")
});

static LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(PHP|Python|Node|Java|Go|Rust)\s+(\d+(?:\.\d+)*)").expect("language pattern is valid")
});

static DATABASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(MySQL|PostgreSQL)\s+(\d+(?:\.\d+)*)").expect("database pattern is valid")
});

const NOT_DEFINED: &str = "Not defined";
const DEFAULT_TIME_TARGET: &str = "500 ms";
const DEFAULT_LOAD: &str = "under 100 concurrent analytical users";
const DEFAULT_MTBF: &str = "MTBF ≥ 4,500 hours";

/// Quality characteristics in table order. A characteristic's importance is
/// its 1-based row rank.
#[derive(Debug, Clone, Default)]
pub struct QualityProfile {
    rows: Vec<TableRow>,
}

impl QualityProfile {
    pub fn from_quality_standards(quality: &str) -> Self {
        Self {
            rows: extract_rows(quality),
        }
    }

    /// First row whose `Characteristic` contains `keyword`, with its rank.
    pub fn find(&self, keyword: &str) -> Option<(usize, &TableRow)> {
        let keyword = keyword.to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.get_or("Characteristic", "").to_lowercase().contains(&keyword))
            .map(|(i, row)| (i + 1, row))
    }

    /// Characteristic names in rank order.
    pub fn characteristics(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.first_of(&["Characteristic"]))
            .collect()
    }
}

/// Normalized response-time target (`"200 ms"`, `"2 seconds"`).
pub fn extract_time_target(measurement: &str) -> Option<String> {
    let caps = TIME_TARGET.captures(measurement)?;
    let value = &caps[2];
    let unit = &caps[3];
    if unit.eq_ignore_ascii_case("ms") {
        Some(format!("{value} ms"))
    } else {
        Some(format!("{value} {unit}"))
    }
}

/// Load condition phrase: the text after the last `under`.
pub fn extract_load_condition(measurement: &str) -> Option<String> {
    let (_, tail) = measurement.rsplit_once("under")?;
    let tail = tail.trim();
    (!tail.is_empty()).then(|| format!("under {tail}"))
}

/// First percentage in the measurement.
pub fn extract_availability(measurement: &str) -> Option<f64> {
    PERCENTAGE.captures(measurement)?[1].parse().ok()
}

/// Percentage as written by a general-purpose float formatter: `99.0`,
/// `99.9`, `99.95`.
fn format_percentage(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.1}")
    } else {
        pct.to_string()
    }
}

/// Hours of downtime per year implied by an availability percentage.
pub fn downtime_hours(pct: f64) -> f64 {
    (1.0 - pct / 100.0) * 8760.0
}

/// `device (detail)` pairs from the tech-stack tables.
pub fn summarize_hardware(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return "reference hardware (OCI compute nodes and local workstations)".to_string();
    }
    rows.iter()
        .map(|row| {
            let device = row
                .first_of(&["Device", "Component", "Hosting", "Infrastructure"])
                .unwrap_or("hardware");
            let detail = row
                .first_of(&["Specification", "Details", "Notes", "Description"])
                .unwrap_or("standard configuration");
            format!("{device} ({detail})")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

struct Scenario<'a> {
    attribute: &'a str,
    importance: usize,
    stimulus: &'a str,
    environment: &'a str,
    artifact: &'a str,
    response: &'a str,
    measure: &'a str,
}

impl Scenario<'_> {
    fn lines(&self) -> Vec<String> {
        vec![
            format!("- Quality Attribute Scenario ({}):", self.attribute),
            format!("  - Ranked Importance: {} (IEEE 830 §4.3.5)", self.importance),
            format!("  - Source: {} owner", self.artifact),
            format!("  - Stimulus: {}", self.stimulus),
            format!("  - Environment: {}", self.environment),
            format!("  - Artifact: {}", self.artifact),
            format!("  - Response: {}", self.response),
            format!("  - Response Measure (ISO/IEC 25023): {}", self.measure),
        ]
    }
}

/// Render Sections 3.3, 3.4 and 3.5 from `quality_standards.md` and
/// `tech_stack.md`.
pub fn render(quality: &str, tech_stack: &str) -> Vec<RenderedSection> {
    let profile = QualityProfile::from_quality_standards(quality);
    let tech_rows = extract_rows(tech_stack);
    let hardware = summarize_hardware(&tech_rows);
    let environment = detect_environment(&format!("{quality}{tech_stack}"));

    info!("Detected hardware context: {}", hardware);
    info!(
        "Environment constraints: {}",
        if environment.is_empty() { "None".to_string() } else { environment.join(", ") }
    );
    info!("Prioritized characteristics: {}", profile.characteristics().join(", "));

    vec![
        RenderedSection::new(
            SrsSection::PerformanceRequirements,
            performance(&profile, &hardware, &environment).join("\n"),
        ),
        RenderedSection::new(SrsSection::DesignConstraints, design_constraints(tech_stack).join("\n")),
        RenderedSection::new(
            SrsSection::SoftwareSystemAttributes,
            system_attributes(&profile, &environment).join("\n"),
        ),
    ]
}

fn performance(profile: &QualityProfile, hardware: &str, environment: &[&str]) -> Vec<String> {
    let row = profile.find("Performance");
    let measurement = row.map_or(NOT_DEFINED, |(_, r)| r.get_or("Measurement & Target", NOT_DEFINED));
    let time_target = extract_time_target(measurement).unwrap_or_else(|| DEFAULT_TIME_TARGET.into());
    let load = row
        .and_then(|_| extract_load_condition(measurement))
        .unwrap_or_else(|| DEFAULT_LOAD.into());
    let env_note = if environment.is_empty() {
        "stable compute and network environment".to_string()
    } else {
        environment.join(", ")
    };
    let importance = row.map_or(1, |(rank, _)| rank);

    let mut lines = vec![
        format!("- The system shall respond to requirement traceability queries within {time_target} {load}."),
        format!("  - Environment Constraint: {env_note}; hardware ceiling: {hardware}."),
    ];
    lines.extend(
        Scenario {
            attribute: "Performance",
            importance,
            stimulus: "Analysts request dashboards",
            environment: &env_note,
            artifact: "Traceability Dashboard Service",
            response: &format!("Response time {time_target} for the dashboard"),
            measure: measurement,
        }
        .lines(),
    );
    lines.push(format!(
        "- The system shall synchronize new requirements data within {time_target} of ingest {load}."
    ));
    lines.push(format!("  - Measurement (ISO/IEC 25023): {measurement}"));
    lines.extend(
        Scenario {
            attribute: "Performance",
            importance,
            stimulus: "New requirements arrive via ingestion pipeline",
            environment: &env_note,
            artifact: "Requirement Ingestion Service",
            response: &format!("Data synchronized and indexed within {time_target}"),
            measure: measurement,
        }
        .lines(),
    );
    if row.is_none() {
        lines.push("- Flag: Performance target not measurable; specify latency and load per ISO/IEC 25023.".into());
    }
    lines
}

fn design_constraints(tech_stack: &str) -> Vec<String> {
    let text = parse_tables(tech_stack)
        .iter()
        .flat_map(|table| {
            table.rows.iter().map(move |row| {
                table
                    .headers
                    .iter()
                    .map(|h| row.get_or(h, ""))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines: Vec<String> = LANGUAGE
        .captures_iter(&text)
        .map(|c| format!("- Language: {} {} per technology stack definition.", &c[1], &c[2]))
        .collect();
    if lines.is_empty() {
        lines.push("- Language: Maintain current supported versions defined by stakeholders.".into());
    }

    let databases: Vec<String> = DATABASE
        .captures_iter(&text)
        .map(|c| {
            format!(
                "- Database: {} {} with ACID integrity policies enforced via prepared statements and transaction logging.",
                &c[1], &c[2]
            )
        })
        .collect();
    if databases.is_empty() {
        lines.push("- Database: Enforce ACID transactions with per-table integrity guards.".into());
    } else {
        lines.extend(databases);
    }

    lines.push("- Implementation standards: Follow ISO/IEC 25010 design guidance, enforce TLS 1.3, and log schema changes.".into());
    lines
}

fn system_attributes(profile: &QualityProfile, environment: &[&str]) -> Vec<String> {
    let env_note = if environment.is_empty() {
        "Standard site power and connectivity".to_string()
    } else {
        environment.join(", ")
    };
    let measurement = |row: Option<(usize, &TableRow)>| {
        row.map_or(NOT_DEFINED.to_string(), |(_, r)| {
            r.get_or("Measurement & Target", NOT_DEFINED).to_string()
        })
    };
    let importance = |row: Option<(usize, &TableRow)>| row.map_or(2, |(rank, _)| rank);

    let reliability = profile.find("Reliability");
    let availability = profile.find("Availability").or(reliability);
    let security = profile.find("Security");
    let maintainability = profile.find("Maintainability");

    let mut lines = Vec::new();

    let measure = measurement(reliability);
    let mtbf = MTBF
        .captures(&measure)
        .map(|c| format!("MTBF ≥ {} hours", &c[1]))
        .unwrap_or_else(|| DEFAULT_MTBF.into());
    lines.push("#### 3.5.1 Reliability".to_string());
    lines.push(format!("- {mtbf}; measurement via ISO/IEC 25023 reliability tests."));
    lines.push("- Quality Attribute Scenario: Reliability".into());
    lines.extend(
        Scenario {
            attribute: "Reliability",
            importance: importance(reliability),
            stimulus: "Subsystem operations continue",
            environment: &env_note,
            artifact: "Operational Services",
            response: &mtbf,
            measure: &measure,
        }
        .lines(),
    );

    let measure = measurement(availability);
    let pct = extract_availability(&measure).unwrap_or(if reliability.is_some() { 99.9 } else { 99.0 });
    let pct_text = format_percentage(pct);
    lines.push("#### 3.5.2 Availability".into());
    lines.push(format!(
        "- The system shall maintain availability ≥ {pct_text}% per ISO/IEC 25023, implying downtime ≤ {:.1} hours/year.",
        downtime_hours(pct)
    ));
    lines.extend(
        Scenario {
            attribute: "Availability",
            importance: importance(availability),
            stimulus: "Users access services",
            environment: &env_note,
            artifact: "Platform Services",
            response: &format!("Availability ≥ {pct_text}%"),
            measure: &measure,
        }
        .lines(),
    );

    let measure = measurement(security);
    lines.push("#### 3.5.3 Security".into());
    lines.push("- Encryption: AES-256 for data at rest and in transit + TLS 1.3, access control via RBAC.".into());
    lines.push("- Auditing: Log all privilege changes with ISO timestamp precision.".into());
    lines.extend(
        Scenario {
            attribute: "Security",
            importance: importance(security),
            stimulus: "Admin configures access",
            environment: &env_note,
            artifact: "Security Services",
            response: "AES-256/RBAC enforced",
            measure: &measure,
        }
        .lines(),
    );

    let measure = measurement(maintainability);
    lines.push("#### 3.5.4 Maintainability".into());
    lines.push("- Documentation: ISO/IEC 25023 analyzability reports updated each sprint; modularity goals require < 200 LOC modules.".into());
    lines.push("- Quality gates: Code review coverage ≥ 90% and automated dependency checks.".into());
    lines.extend(
        Scenario {
            attribute: "Maintainability",
            importance: importance(maintainability),
            stimulus: "Engineers update modules",
            environment: &env_note,
            artifact: "Maintenance Playbooks",
            response: "Documentation refresh and modular refactors",
            measure: &measure,
        }
        .lines(),
    );

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const QUALITY: &str = "\
| Characteristic | Measurement & Target |
|----------------|----------------------|
| Security | RBAC on every endpoint |
| Performance Efficiency | p95 < 200 ms under 250 concurrent tutors |
| Reliability | MTBF 6000 hours |
| Availability | 99.95% monthly |

Sites suffer from intermittent connectivity.
";

    const TECH: &str = "\
| Component | Specification |
|-----------|---------------|
| Runtime | Rust 1.80 on Ubuntu 22.04 |
| Database | PostgreSQL 16.1 |
";

    #[test_case("p95 < 200 ms", Some("200 ms") ; "milliseconds")]
    #[test_case("within 2 seconds", Some("2 seconds") ; "seconds")]
    #[test_case("1.5s end to end", Some("1.5 s") ; "short unit")]
    #[test_case("30 sessions", None ; "no unit")]
    fn test_time_target(input: &str, expected: Option<&str>) {
        assert_eq!(extract_time_target(input).as_deref(), expected);
    }

    #[test_case(99.0, "99.0")]
    #[test_case(99.9, "99.9")]
    #[test_case(99.95, "99.95")]
    fn test_format_percentage(pct: f64, expected: &str) {
        assert_eq!(format_percentage(pct), expected);
    }

    #[test]
    fn test_load_condition() {
        assert_eq!(
            extract_load_condition("200 ms under 250 concurrent tutors").as_deref(),
            Some("under 250 concurrent tutors")
        );
        assert_eq!(extract_load_condition("200 ms"), None);
    }

    #[test]
    fn test_downtime() {
        assert_eq!(format!("{:.1}", downtime_hours(99.9)), "8.8");
        assert_eq!(format!("{:.1}", downtime_hours(99.0)), "87.6");
    }

    #[test]
    fn test_performance_section() {
        let sections = render(QUALITY, TECH);
        let body = &sections[0].body;
        assert_eq!(sections[0].section, SrsSection::PerformanceRequirements);
        assert!(body.starts_with(
            "- The system shall respond to requirement traceability queries within 200 ms under 250 concurrent tutors.\n"
        ));
        assert!(body.contains(
            "  - Environment Constraint: Intermittent Connectivity; hardware ceiling: Runtime (Rust 1.80 on Ubuntu 22.04); Database (PostgreSQL 16.1).\n"
        ));
        assert!(body.contains("  - Ranked Importance: 2 (IEEE 830 §4.3.5)"));
        assert!(!body.contains("- Flag:"));
    }

    #[test]
    fn test_performance_defaults() {
        let sections = render("", "");
        let body = &sections[0].body;
        assert!(body.contains("within 500 ms under 100 concurrent analytical users."));
        assert!(body.contains("stable compute and network environment; hardware ceiling: reference hardware"));
        assert!(body.contains("  - Ranked Importance: 1 (IEEE 830"));
        assert!(body.ends_with("- Flag: Performance target not measurable; specify latency and load per ISO/IEC 25023."));
    }

    #[test]
    fn test_design_constraints() {
        let sections = render(QUALITY, TECH);
        assert_eq!(
            sections[1].body,
            "- Language: Rust 1.80 per technology stack definition.\n\
             - Database: PostgreSQL 16.1 with ACID integrity policies enforced via prepared statements and transaction logging.\n\
             - Implementation standards: Follow ISO/IEC 25010 design guidance, enforce TLS 1.3, and log schema changes."
        );
    }

    #[test]
    fn test_system_attributes() {
        let sections = render(QUALITY, TECH);
        let body = &sections[2].body;
        assert!(body.starts_with("#### 3.5.1 Reliability\n- MTBF ≥ 6000 hours; measurement"));
        assert!(body.contains("#### 3.5.2 Availability\n- The system shall maintain availability ≥ 99.95% per ISO/IEC 25023, implying downtime ≤ 4.4 hours/year."));
        assert!(body.contains("#### 3.5.3 Security"));
        assert!(body.contains("#### 3.5.4 Maintainability"));
        assert!(body.contains("  - Ranked Importance: 4 (IEEE 830"));
    }

    #[test]
    fn test_availability_defaults() {
        let without = render("", "");
        assert!(without[2].body.contains("availability ≥ 99.0% per ISO/IEC 25023, implying downtime ≤ 87.6 hours/year."));
        assert!(without[2].body.contains("- MTBF ≥ 4,500 hours;"));

        let quality = "| Characteristic | Measurement & Target |\n|---|---|\n| Reliability | no outages |\n";
        let with = render(quality, "");
        assert!(with[2].body.contains("availability ≥ 99.9% per ISO/IEC 25023, implying downtime ≤ 8.8 hours/year."));
    }
}
