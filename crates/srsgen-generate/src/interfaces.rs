//! Section 3.1: Interface Specification.

use srsgen_markdown::{extract_actors, extract_rows, mentions, KeywordMatches, KeywordSet};
use tracing::info;

use crate::context::RenderContext;
use crate::layout::{RenderedSection, SrsSection};

/// Render Section 3.1 from `tech_stack.md`, `features.md` and
/// `quality_standards.md`.
pub fn render(ctx: &RenderContext, tech_stack: &str, features: &str, quality: &str) -> RenderedSection {
    let infra = KeywordSet::infrastructure().detect_lines(tech_stack);
    info!("Detected keywords: {}", infra.terms().collect::<Vec<_>>().join(", "));

    let rows = extract_rows(features);
    info!("Parsed {} feature rows for actor extraction.", rows.len());
    let actors = extract_actors(&rows);
    info!("External actors identified: {}", actors.join(", "));

    let body = [
        external_actors(&actors, &infra),
        user_interfaces(&actors),
        hardware_interfaces(&infra),
        software_interfaces(ctx, &infra),
        communications(quality),
    ]
    .join("\n\n");

    RenderedSection::new(SrsSection::InterfaceSpecification, body)
}

fn external_actors(actors: &[String], infra: &KeywordMatches) -> String {
    let services: Vec<&str> = [
        ("OCI", "OCI REST APIs"),
        ("MySQL", "MySQL 8.0 instance"),
        ("PostgreSQL", "PostgreSQL 16.1 analytics store"),
    ]
    .into_iter()
    .filter(|(term, _)| infra.contains(term))
    .map(|(_, service)| service)
    .collect();

    let clause = if services.is_empty() {
        String::new()
    } else {
        format!(" and the services ({})", services.join(", "))
    };
    format!("External actors include {}{}.", actors.join(", "), clause)
}

fn user_interfaces(actors: &[String]) -> String {
    [
        "### 3.1.1 User Interfaces".to_string(),
        "- Interfaces shall implement a web-based responsive design with role-based dashboards that span traceability, Fit Criteria reporting, and maintenance controls exposed to the registered actors.".to_string(),
        "- Input validation SHALL follow ISO/IEC 25062, delivering field-level constraints, format hints, and structured error messaging tied to logged ticket IDs.".to_string(),
        "- Error notifications SHALL reference ISO/IEC 25062 guidance, avoid vague ‘friendly’ adjectives, and provide corrective actions aligned with the active actor persona.".to_string(),
        format!("- Supported actors: {}.", actors.join(", ")),
    ]
    .join("\n")
}

fn hardware_interfaces(infra: &KeywordMatches) -> String {
    let mut lines = vec![
        "### 3.1.2 Hardware Interfaces",
        "- Hardware interfaces shall honor the HP Z440 workstations, TPM 2.0 modules, and OCI compute shapes detailed in tech_stack.md.",
        "| Device | Interface | Notes |",
        "|--------|-----------|-------|",
    ];
    if infra.contains("HP Z440") {
        lines.push("| HP Z440 workstation | USB 3.0, serial console, TPM 2.0 | Governance tooling runs on-premise via this host. |");
    }
    if infra.contains("OCI") {
        lines.push("| OCI VM.Standard.E3.Flex | Virtual NICs, NVMe bus | OCI nodes present virtualized Ethernet and NVMe storage. |");
    }
    lines.push("| Bluetooth / BLE peripherals | BLE 5.2 radios | Optional peripheral devices such as kiosks or printers interface through BLE. |");
    lines.push("| Network infrastructure | IEEE 802.11ax, Gigabit Ethernet | Wireless and wired connectivity for admin consoles and on-site devices. |");
    lines.push("- Memory constraints reference the stated RAM guidance; production nodes SHALL provision at least 32 GB ECC.");
    lines.join("\n")
}

fn software_interfaces(ctx: &RenderContext, infra: &KeywordMatches) -> String {
    let mut lines: Vec<String> = vec![
        "### 3.1.3 Software Interfaces".into(),
        "- Software interfaces list every external database, API, or library plus its protocol, version, and interaction mode.".into(),
        "| Interface | Version | Protocol | Description |".into(),
        "|-----------|---------|----------|-------------|".into(),
    ];
    if infra.contains("MySQL") {
        lines.push("| MySQL database | 8.0 Enterprise | SQL/TCP over TLS 1.3 (Port 3306) | Central requirements store with row-level security and concurrency tuning. |".into());
    }
    if infra.contains("PostgreSQL") {
        lines.push("| PostgreSQL database | 16.1 | Native TCP (Port 5432) | Analytics workloads and reporting services. |".into());
    }
    if infra.contains("OCI") {
        lines.push("| OCI REST APIs | 2026-01 | HTTPS/TLS 1.3 (Port 443) | Identity and orchestration via RFC 7519 (JWT) bearer tokens. |".into());
    }
    lines.push(format!(
        "| {} Traceability API | 1.0 | RESTful JSON over HTTPS (Port 443) | Exposes requirements and verification links for stakeholders. |",
        ctx.project_name
    ));
    lines.push("| Logging & Monitoring Suite | v3.5 | gRPC/TLS 1.3 | Streams telemetry to Ops dashboards and alert pipelines. |".into());
    lines.join("\n")
}

fn communications(quality: &str) -> String {
    let mut lines = vec![
        "### 3.1.4 Communications Interfaces",
        "- Communications SHALL use IPv4/IPv6 stacks with TLS 1.3 enforced end-to-end and JWT tokens for API authentication.",
        "- Ports include 443 for HTTPS, 3306 for MySQL, and 5432 for PostgreSQL; additional ports require documented risk approvals.",
        "- The connectivity map describes client dashboards -> load balancer -> application services -> MySQL/PostgreSQL clusters -> OCI services over private peering.",
        "- Wireless access for administration consoles SHALL comply with IEEE 802.11ax and operate inside compliance VLANs that mirror the security posture of the wired stack.",
    ];
    if mentions(quality, "compatibility") {
        lines.push("- ISO/IEC 25010 Compatibility requirements further constrain the communication interfaces so that API contracts remain stable across supported OS/browser combinations.");
    }
    lines.join("\n")
}
