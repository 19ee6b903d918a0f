//! Audit report assembly.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::classify::mentions_design;
use crate::scanner::{DeclaredFeature, RequirementRecord};

const RTM_HEADER: &str =
    "| Req ID | Feature Name | Source/Vision Goal | ISO 25010 Quality Tag | Verification Method |";
const RTM_SEPARATOR: &str =
    "|--------|--------------|-------------------|----------------------|----------------------|";

const CONFORMANCE: [&str; 2] = [
    "- This audit verifies the SRS against IEEE 830 and US ISO/IEC 25010 by enforcing clear requirements, traceability links, and measurability.",
    "- Requirements are cross-referenced to vision goals, features, and quality characteristics; verification methods and standard references are documented herein.",
];

/// Outcome of one IEEE 830 dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    fn from_ok(ok: bool) -> Self {
        if ok {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        })
    }
}

/// One line of the IEEE 830 audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionVerdict {
    pub dimension: &'static str,
    pub verdict: Verdict,
    pub detail: String,
}

/// Machine-readable digest of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub requirements: usize,
    pub weak_worded: usize,
    pub unmeasurable: usize,
    pub orphans: usize,
    pub unmet_goals: usize,
    pub verdicts: Vec<DimensionVerdict>,
}

/// Scanned requirements checked against the declared features.
#[derive(Debug, Clone)]
pub struct AuditReport {
    records: Vec<RequirementRecord>,
    features: Vec<DeclaredFeature>,
}

impl AuditReport {
    pub fn new(records: Vec<RequirementRecord>, features: Vec<DeclaredFeature>) -> Self {
        Self { records, features }
    }

    pub fn records(&self) -> &[RequirementRecord] {
        &self.records
    }

    /// Requirements no declared feature claims.
    pub fn orphans(&self) -> impl Iterator<Item = &RequirementRecord> {
        self.records.iter().filter(|r| r.is_orphan())
    }

    /// Declared features no requirement references, in declaration order.
    pub fn unmet_goals(&self) -> Vec<&str> {
        let used: HashSet<&str> = self
            .records
            .iter()
            .filter(|r| !r.is_orphan())
            .map(|r| r.assigned_feature.as_str())
            .collect();

        self.features
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| !used.contains(name))
            .collect()
    }

    fn weak_worded(&self) -> usize {
        self.records.iter().filter(|r| !r.weak_word_flags.is_empty()).count()
    }

    fn unmeasurable(&self) -> usize {
        self.records.iter().filter(|r| !r.has_measurable_target).count()
    }

    fn has_duplicates(&self) -> bool {
        let unique: HashSet<&str> = self.records.iter().map(|r| r.text.as_str()).collect();
        unique.len() != self.records.len()
    }

    /// PASS/FAIL for each IEEE 830 dimension, in report order.
    pub fn verdicts(&self) -> Vec<DimensionVerdict> {
        let total = self.records.len();
        let weak = self.weak_worded();
        let unmet = self.unmet_goals().len();
        let duplicates = self.has_duplicates();
        let unmeasurable = self.unmeasurable();
        let design = self.records.iter().any(|r| mentions_design(&r.text));
        let orphans = self.orphans().count();

        let verdict = |dimension, ok, detail: String| DimensionVerdict {
            dimension,
            verdict: Verdict::from_ok(ok),
            detail,
        };

        vec![
            verdict("Correctness", total > 0, format!("{total} requirements detected.")),
            verdict(
                "Unambiguous",
                weak == 0,
                format!("{weak} requirement(s) contain weak wording."),
            ),
            verdict("Completeness", unmet == 0, format!("{unmet} goal(s) lack mappings.")),
            verdict(
                "Consistency",
                !duplicates,
                format!(
                    "duplicate statements {}.",
                    if duplicates { "found" } else { "not found" }
                ),
            ),
            verdict(
                "Verifiability",
                unmeasurable == 0,
                format!("{unmeasurable} requirement(s) miss measurable targets."),
            ),
            verdict(
                "Modifiability",
                !design,
                format!(
                    "design terms {} in requirements.",
                    if design { "present" } else { "absent" }
                ),
            ),
            verdict("Traceability", orphans == 0, format!("{orphans} orphan requirement(s).")),
            verdict(
                "Design Independence",
                !design,
                "requirements should avoid design decisions.".to_string(),
            ),
        ]
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            requirements: self.records.len(),
            weak_worded: self.weak_worded(),
            unmeasurable: self.unmeasurable(),
            orphans: self.orphans().count(),
            unmet_goals: self.unmet_goals().len(),
            verdicts: self.verdicts(),
        }
    }

    /// Render the full report, newline-terminated.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "# Semantic Auditing Report".to_string(),
            "## Requirements Audit (IEEE 830)".to_string(),
        ];
        lines.extend(
            self.verdicts()
                .iter()
                .map(|v| format!("- {}: {} – {}", v.dimension, v.verdict, v.detail)),
        );

        lines.push("## Requirement Traceability Matrix".to_string());
        lines.push(RTM_HEADER.to_string());
        lines.push(RTM_SEPARATOR.to_string());
        lines.extend(self.records.iter().map(|r| {
            format!(
                "| {} | {} | {} | {} | {} |",
                r.id, r.assigned_feature, r.source, r.quality_tag, r.verification_method
            )
        }));

        lines.push("## Ambiguity & Weak Word Report".to_string());
        let flagged: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.is_ambiguous())
            .map(|r| format!("- {} FAIL – {} ({}).", r.id, r.text, ambiguity_reasons(r)))
            .collect();
        if flagged.is_empty() {
            lines.push("- No ambiguity detected; all requirements use precise language.".to_string());
        } else {
            lines.extend(flagged);
        }

        lines.push("## Gap Analysis".to_string());
        lines.push("### Orphan Requirements".to_string());
        let orphans: Vec<String> = self.orphans().map(|r| format!("- {}: {}", r.id, r.text)).collect();
        push_or_none(&mut lines, orphans);
        lines.push("### Unmet Goals".to_string());
        let unmet: Vec<String> = self.unmet_goals().iter().map(|f| format!("- {f}")).collect();
        push_or_none(&mut lines, unmet);

        lines.push("## Standard Conformance Statement".to_string());
        lines.extend(CONFORMANCE.iter().map(|l| l.to_string()));

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }
}

fn ambiguity_reasons(record: &RequirementRecord) -> String {
    let mut reasons = Vec::new();
    if !record.weak_word_flags.is_empty() {
        reasons.push(format!("weak wording ({})", record.weak_word_flags.join(", ")));
    }
    if !record.has_measurable_target {
        reasons.push("missing measurable target".to_string());
    }
    reasons.join("; ")
}

fn push_or_none(lines: &mut Vec<String>, items: Vec<String>) {
    if items.is_empty() {
        lines.push("- None.".to_string());
    } else {
        lines.extend(items);
    }
}
