//! Sections 3.2.2 to 3.2.4: process descriptions, data constructs and the
//! data dictionary, modeled from `business_rules.md`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use srsgen_markdown::{detect_entities, extract_rows, list_items, Document, TableRow, FALLBACK_ENTITIES};
use tracing::info;

use crate::layout::{LogicSubsection, RenderedSubsection};

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:if|when)\s+(.+?)\s*(?:,|\bthen\b|$)").expect("condition pattern is valid")
});

static ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bthen\b|->|⇒)\s*(.+)").expect("action pattern is valid")
});

static NOTE_FORMULA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=[^\n]+").expect("formula pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Database platform the field types are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    MySql,
    PostgreSql,
}

impl Database {
    /// PostgreSQL when the tech stack mentions it, MySQL otherwise.
    pub fn from_tech_stack(tech_stack: &str) -> Self {
        if tech_stack.to_lowercase().contains("postgresql") {
            Self::PostgreSql
        } else {
            Self::MySql
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
        }
    }

    fn column_type(&self, kind: FieldKind) -> &'static str {
        match (self, kind) {
            (Self::MySql, FieldKind::Uuid) => "CHAR(36)",
            (Self::MySql, FieldKind::Currency) => "DECIMAL(19,4)",
            (Self::MySql, FieldKind::Enum) => "ENUM('Scheduled','InProgress','Completed','Cancelled')",
            (Self::MySql, FieldKind::Timestamp) => "TIMESTAMP",
            (Self::PostgreSql, FieldKind::Uuid) => "UUID",
            (Self::PostgreSql, FieldKind::Currency) => "NUMERIC(19,4)",
            (Self::PostgreSql, FieldKind::Enum) => {
                "TEXT CHECK (status IN ('Scheduled','InProgress','Completed','Cancelled'))"
            }
            (Self::PostgreSql, FieldKind::Timestamp) => "TIMESTAMP WITH TIME ZONE",
            (_, FieldKind::Text) => "VARCHAR(255)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Uuid,
    Currency,
    Text,
    Enum,
    Timestamp,
}

/// One typed field of a data construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub representation: &'static str,
    pub units: &'static str,
    pub accuracy: &'static str,
}

/// Field list for an entity, chosen by name.
pub fn entity_fields(entity: &str, db: Database) -> Vec<FieldSpec> {
    use FieldKind::*;

    let lower = entity.to_lowercase();
    let template: &[(&str, FieldKind, &str, &str)] = if lower.contains("tenant") {
        &[
            ("tenant_id", Uuid, "UUID string", "Primary key; non-null."),
            ("name", Text, "UTF-8 string", "Non-empty; maximal 255 chars."),
            ("subscription_level", Text, "UTF-8 string", "Enum: Free, Standard, Premium."),
            ("account_balance", Currency, "UGX currency", ">= 0.00; two-decimal precision."),
            ("created_at", Timestamp, "UTC timestamp", "Captured to the second."),
        ]
    } else if lower.contains("session") {
        &[
            ("session_id", Uuid, "UUID string", "Primary key; non-null."),
            ("tenant_id", Uuid, "UUID string", "Foreign key to TenantRecord."),
            ("tutor_id", Uuid, "UUID string", "Foreign key to TutorRecord."),
            ("start_time", Timestamp, "UTC timestamp", ">= current time; second precision."),
            ("end_time", Timestamp, "UTC timestamp", ">= start_time; second precision."),
            ("status", Enum, "Enumerated token", "Scheduled, InProgress, Completed, Cancelled."),
            ("fee_amount", Currency, "UGX currency", "> 0.00; Round Half Up to two decimals."),
        ]
    } else if ["payment", "invoice", "order"].iter().any(|k| lower.contains(k)) {
        &[
            ("payment_id", Uuid, "UUID string", "Primary key; audit trail."),
            ("tenant_id", Uuid, "UUID string", "Linked tenant record."),
            ("amount", Currency, "UGX currency", "> 0.00; Round Half Up."),
            ("created_at", Timestamp, "UTC timestamp", "Captured to the second."),
            ("status", Text, "UTF-8 string", "Pending, Completed, Failed."),
        ]
    } else {
        &[
            ("record_id", Uuid, "UUID string", "Primary key."),
            ("description", Text, "UTF-8 string", "250-character summary."),
            ("created_at", Timestamp, "UTC timestamp", "Captured to the second."),
        ]
    };

    template
        .iter()
        .map(|&(name, kind, units, accuracy)| FieldSpec {
            name,
            representation: db.column_type(kind),
            units,
            accuracy,
        })
        .collect()
}

/// A decision or calculation modeled as a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub trigger: String,
    pub action: String,
    pub formula: String,
    pub entities: Vec<String>,
}

impl Process {
    fn fallback() -> Self {
        Self {
            name: "Default Business Decision".into(),
            trigger: "A documented business rule requires evaluation.".into(),
            action: "Route the action through the fallback workflow.".into(),
            formula: String::new(),
            entities: vec!["Operations".into(), "Monitoring".into()],
        }
    }
}

/// Condition (`if|when ...`) and action (`then|->|⇒ ...`) of a rule
/// sentence. Either may be empty.
pub fn condition_action(text: &str) -> (String, String) {
    let condition = CONDITION
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();
    let action = ACTION
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();
    (condition, action)
}

fn or_else(values: &[&str], default: &str) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Decision points from the table rows and `- ` items of a section body.
pub fn parse_decision_points(section: &str) -> Vec<Process> {
    let mut processes: Vec<Process> = extract_rows(section)
        .iter()
        .map(|row| {
            let name = row
                .first_of(&["Decision Point", "Decision", "Name", "Process"])
                .unwrap_or("Decision");
            let trigger = row.first_of(&["Trigger", "Condition", "Input", "When"]).unwrap_or("");
            let action = row.first_of(&["Action", "Outcome", "Response"]).unwrap_or("");
            let notes = row.first_of(&["Notes", "Description"]).unwrap_or("");
            let affected = row.first_of(&["Affected Entities", "Entities"]).unwrap_or("");
            let (condition, act) = condition_action(notes);

            Process {
                name: name.to_string(),
                trigger: or_else(&[trigger, &condition, notes], "Documented decision trigger"),
                action: or_else(&[action, &act, notes], "Engage the documented response"),
                formula: String::new(),
                entities: affected
                    .split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string)
                    .collect(),
            }
        })
        .collect();

    for item in list_items(section) {
        let (name, rest) = item.split_once(':').unwrap_or((item.as_str(), ""));
        let rest = rest.trim();
        let (condition, action) = condition_action(if rest.is_empty() { item.as_str() } else { rest });
        processes.push(Process {
            name: or_else(&[name], "Decision"),
            trigger: or_else(&[&condition, rest], "Documented decision trigger"),
            action: or_else(&[&action, rest], "Engage the documented response"),
            formula: String::new(),
            entities: Vec::new(),
        });
    }

    processes
}

/// Calculations from the table rows and `name = formula` items of a section
/// body.
pub fn parse_calculations(section: &str) -> Vec<Process> {
    let mut processes: Vec<Process> = extract_rows(section)
        .iter()
        .map(|row| {
            let name = row
                .first_of(&["Calculation", "Formula Name", "Name", "Process"])
                .unwrap_or("Calculation");
            let description = row.first_of(&["Description", "Detail"]).unwrap_or("");
            let formula = row
                .first_of(&["Formula", "Expression", "Equation"])
                .map(str::to_string)
                .or_else(|| note_formula(row))
                .unwrap_or_default();

            Process {
                name: name.to_string(),
                trigger: or_else(
                    &[row.get_or("Trigger", ""), description, row.get_or("Input", "")],
                    "Scheduled execution",
                ),
                action: or_else(&[description], "Produce the required numeric output"),
                formula,
                entities: Vec::new(),
            }
        })
        .collect();

    for item in list_items(section) {
        let (name, formula) = match item.split_once('=') {
            Some((name, formula)) => (name.trim(), formula.trim()),
            None => (item.as_str(), ""),
        };
        processes.push(Process {
            name: or_else(&[name], "Calculation"),
            trigger: "Referenced by business rule".into(),
            action: "Compute the documented value".into(),
            formula: formula.to_string(),
            entities: Vec::new(),
        });
    }

    processes
}

fn note_formula(row: &TableRow) -> Option<String> {
    let notes = row.get("Notes")?;
    NOTE_FORMULA
        .find(notes)
        .map(|m| m.as_str().trim_start_matches('=').trim().to_string())
        .filter(|f| !f.is_empty())
}

/// Wrap an arithmetic expression as display LaTeX.
pub fn latex_wrap(expression: &str) -> Option<String> {
    let cleaned = expression.trim();
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = cleaned
        .replace("sum(", "\\sum(")
        .replace("Sum(", "\\sum(")
        .replace(" * ", " \\times ")
        .replace('*', " \\times ")
        .replace(" / ", " \\div ")
        .replace('=', " = ");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.starts_with("$$") && cleaned.ends_with("$$") {
        Some(cleaned.to_string())
    } else {
        Some(format!("$$ {cleaned} $$"))
    }
}

/// Quality targets quoted in the process and construct notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityTargets {
    pub reliability: String,
    pub analysability: String,
}

impl QualityTargets {
    pub fn from_quality_standards(quality: &str) -> Self {
        let rows = extract_rows(quality);
        let analysability = match find_metric(&rows, "Analysability") {
            m if m.is_empty() => find_metric(&rows, "Maintainability"),
            m => m,
        };
        Self {
            reliability: find_metric(&rows, "Reliability"),
            analysability,
        }
    }
}

fn find_metric(rows: &[TableRow], characteristic: &str) -> String {
    rows.iter()
        .find(|row| {
            row.get_or("Characteristic", "")
                .eq_ignore_ascii_case(characteristic)
        })
        .and_then(|row| row.first_of(&["Measurement & Target", "Description"]))
        .unwrap_or("")
        .to_string()
}

/// Render the three logic subsections from `business_rules.md`,
/// `tech_stack.md` and `quality_standards.md`.
pub fn render(business_rules: &str, tech_stack: &str, quality: &str) -> Vec<RenderedSubsection> {
    let db = Database::from_tech_stack(tech_stack);
    info!("Detected primary database platform: {}", db.name());

    let targets = QualityTargets::from_quality_standards(quality);
    let rules = Document::parse(business_rules);

    let mut processes = parse_decision_points(&rules.extract_containing("Decision Points"));
    processes.extend(parse_calculations(&rules.extract_containing("Calculations")));
    if processes.is_empty() {
        processes.push(Process::fallback());
    }

    let mut pool: BTreeSet<String> = detect_entities(business_rules);
    pool.extend(FALLBACK_ENTITIES.iter().map(|e| e.to_string()));
    let entities: Vec<String> = pool.into_iter().collect();

    info!(
        "Modeled logic content (Processes: {}, Records: {}).",
        processes.len(),
        entities.len()
    );

    vec![
        RenderedSubsection::new(
            LogicSubsection::ProcessDescriptions,
            process_descriptions(&processes, &targets, &entities),
        ),
        RenderedSubsection::new(
            LogicSubsection::DataConstructSpecifications,
            data_constructs(&entities, db, &targets),
        ),
        RenderedSubsection::new(LogicSubsection::DataDictionary, data_dictionary(&entities, db)),
    ]
}

fn sentence(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

fn process_descriptions(processes: &[Process], targets: &QualityTargets, pool: &[String]) -> String {
    let reliability = match targets.reliability.as_str() {
        "" => "Reliability target not specified in quality standards.",
        r => r,
    };
    let analysability = match targets.analysability.as_str() {
        "" => "Analysability metric absent; default to modular trace logs.",
        a => a,
    };

    let mut lines = vec![format!(
        "Per ISO/IEC 25010 reliability ({reliability}) and analysability ({analysability}), each Transition Model below details input, algorithm, and affected entities."
    )];

    for (i, process) in processes.iter().enumerate() {
        let condition = sentence(&process.trigger);
        let action = sentence(&process.action);
        let entities = if process.entities.is_empty() {
            pool
        } else {
            process.entities.as_slice()
        };

        lines.push(format!("#### 3.2.2.{} {}", i + 1, process.name));
        lines.push(format!("- Input: {condition}"));
        lines.push("- Algorithm:".into());
        lines.push("  1. Establish the current state defined by the trigger; honor the documented inputs so reliability remains visible.".into());
        lines.push(format!(
            "  2. IF {condition} THEN {action} ELSE escalate to operations with contextual logs for analysability."
        ));
        lines.push(match latex_wrap(&process.formula) {
            Some(formula) => format!(
                "  3. The system shall evaluate the expression {formula} and round the result to the nearest 2 decimal places using the 'Round Half Up' method."
            ),
            None => "  3. The system shall record the executed branch so analysts can reproduce the Transition Model pathway.".into(),
        });
        lines.push(format!("- Affected Entities: {}", entities.join(", ")));
        lines.push("- Transition Model Note: This logic represents a state transition that feeds the next decision or calculation while staying aligned with reliability and analysability expectations.".into());
    }

    lines.join("\n")
}

fn data_constructs(entities: &[String], db: Database, targets: &QualityTargets) -> String {
    let reliability = match targets.reliability.as_str() {
        "" => "Reliability target pending.",
        r => r,
    };
    let analysability = match targets.analysability.as_str() {
        "" => "Analysability metric pending.",
        a => a,
    };

    let mut lines = vec![format!(
        "Reliability ({reliability}) and analysability ({analysability}) information requirements drive these constructs; each record keeps trace logs and well-documented fields."
    )];

    for entity in entities {
        let description = if entity.to_lowercase().contains("record") {
            "Captures identity, accounting, and control data for the listed entity."
        } else {
            "Represents the lifecycle of the entity as it flows through processes."
        };
        let fields: Vec<&str> = entity_fields(entity, db).iter().map(|f| f.name).collect();
        lines.push(format!("- **{entity}**: {description}"));
        lines.push(format!("  - Core fields: {}.", fields.join(", ")));
        lines.push("  - Structural note: The record is part of the data layer in the Transition Models described in 3.2.2.".into());
    }

    lines.join("\n")
}

fn data_dictionary(entities: &[String], db: Database) -> String {
    let mut lines = vec![
        "Below is the field-level data dictionary tied to the constructs described above.".to_string(),
        "| Name | Representation | Units/Format | Range/Accuracy |".to_string(),
        "| ---- | -------------- | ------------ | -------------- |".to_string(),
    ];
    for entity in entities {
        for field in entity_fields(entity, db) {
            lines.push(format!(
                "| {entity}.{} | {} | {} | {} |",
                field.name, field.representation, field.units, field.accuracy
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const RULES: &str = "\
# Business Rules

## Decision Points
| Decision Point | Condition | Action | Affected Entities |
|----------------|-----------|--------|-------------------|
| Overdue Balance | | | TenantRecord, PaymentEvent |
- Cancellation: If the tutor cancels within 2 hours, then refund the student

## Calculations
| Calculation | Description | Formula |
|-------------|-------------|---------|
| Session Fee | Fee charged per session | fee = rate*hours |
- Monthly Total = sum(fees) / 12
";

    #[test_case("If balance < 0, block bookings", "balance < 0", "" ; "comma")]
    #[test_case("when the tutor is late then notify admin", "the tutor is late", "notify admin" ; "then")]
    #[test_case("score -> escalate", "", "escalate" ; "arrow")]
    #[test_case("plain text", "", "" ; "nothing")]
    fn test_condition_action(text: &str, condition: &str, action: &str) {
        assert_eq!(condition_action(text), (condition.to_string(), action.to_string()));
    }

    #[test_case("fee = rate*hours", "$$ fee = rate \\times hours $$")]
    #[test_case("total=sum(x) / 12", "$$ total = \\sum(x) \\div 12 $$")]
    #[test_case("$$ a = b $$", "$$ a = b $$")]
    fn test_latex_wrap(input: &str, expected: &str) {
        assert_eq!(latex_wrap(input).as_deref(), Some(expected));
    }

    #[test]
    fn test_latex_wrap_empty() {
        assert_eq!(latex_wrap("  "), None);
    }

    #[test]
    fn test_decision_points() {
        let doc = Document::parse(RULES);
        let processes = parse_decision_points(&doc.extract_containing("Decision Points"));
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].name, "Overdue Balance");
        assert_eq!(processes[0].trigger, "Documented decision trigger");
        assert_eq!(processes[0].entities, vec!["TenantRecord", "PaymentEvent"]);
        assert_eq!(processes[1].name, "Cancellation");
        assert_eq!(processes[1].trigger, "the tutor cancels within 2 hours");
        assert_eq!(processes[1].action, "refund the student");
    }

    #[test]
    fn test_calculations() {
        let doc = Document::parse(RULES);
        let processes = parse_calculations(&doc.extract_containing("Calculations"));
        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].formula, "fee = rate*hours");
        assert_eq!(processes[0].trigger, "Fee charged per session");
        assert_eq!(processes[1].name, "Monthly Total");
        assert_eq!(processes[1].formula, "sum(fees) / 12");
        assert_eq!(processes[1].trigger, "Referenced by business rule");
    }

    #[test]
    fn test_database_choice() {
        assert_eq!(Database::from_tech_stack("PostgreSQL 16.1"), Database::PostgreSql);
        assert_eq!(Database::from_tech_stack("MySQL 8.0"), Database::MySql);
        assert_eq!(Database::from_tech_stack(""), Database::MySql);
    }

    #[test]
    fn test_entity_fields_by_name() {
        let session = entity_fields("TutorSession", Database::PostgreSql);
        assert_eq!(session[0].representation, "UUID");
        assert_eq!(session.len(), 7);
        let invoice = entity_fields("InvoiceEvent", Database::MySql);
        assert_eq!(invoice[0].name, "payment_id");
        assert_eq!(invoice[2].representation, "DECIMAL(19,4)");
        let other = entity_fields("UserProfile", Database::MySql);
        assert_eq!(other.iter().map(|f| f.name).collect::<Vec<_>>(), vec!["record_id", "description", "created_at"]);
    }

    #[test]
    fn test_render_sections() {
        let quality = "| Characteristic | Measurement & Target |\n|---|---|\n| Reliability | MTBF 5000 hours |\n";
        let sections = render(RULES, "MySQL 8.0", quality);
        assert_eq!(sections.len(), 3);

        let process = &sections[0].body;
        assert!(process.starts_with("Per ISO/IEC 25010 reliability (MTBF 5000 hours) and analysability (Analysability metric absent;"));
        assert!(process.contains("#### 3.2.2.1 Overdue Balance\n- Input: Documented decision trigger.\n"));
        assert!(process.contains("- Affected Entities: TenantRecord, PaymentEvent\n"));
        assert!(process.contains("#### 3.2.2.3 Session Fee"));
        assert!(process.contains("evaluate the expression $$ fee = rate \\times hours $$ and round"));
        assert!(process.contains("- Affected Entities: PaymentEvent, TenantRecord, TutorSession\n"));

        let constructs = &sections[1].body;
        assert!(constructs.contains("- **TenantRecord**: Captures identity, accounting, and control data"));
        assert!(constructs.contains("- **TutorSession**: Represents the lifecycle of the entity"));

        let dictionary = &sections[2].body;
        assert!(dictionary.contains("| TutorSession.status | ENUM('Scheduled','InProgress','Completed','Cancelled') |"));
    }

    #[test]
    fn test_default_process() {
        let sections = render("# Rules\n", "", "");
        assert!(sections[0].body.contains("#### 3.2.2.1 Default Business Decision\n- Input: A documented business rule requires evaluation.\n"));
        assert!(sections[0].body.contains("- Affected Entities: Operations, Monitoring\n"));
    }
}
