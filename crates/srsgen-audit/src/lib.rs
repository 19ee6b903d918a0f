//! Semantic audit of a generated SRS.
//!
//! Scans the cumulative document for "the system shall" sentences, classifies
//! each one, traces it to the declared features and writes an IEEE 830 audit
//! report with a requirement traceability matrix.

pub mod classify;
pub mod report;
pub mod scanner;

pub use classify::{QualityCharacteristic, VerificationMethod};
pub use report::{AuditReport, AuditSummary, DimensionVerdict, Verdict};
pub use scanner::{declared_features, extract_goals, DeclaredFeature, RequirementRecord, Scanner};

use srsgen_common_config::{ContextFile, ProjectLayout};
use srsgen_common_core::{Error, Result};
use srsgen_common_fs::{path::display_relative, read_required, write_string_atomic};
use tracing::{debug, info};

/// Audit the SRS of `layout` and write the report.
///
/// Every input is read before the report is written, so a failed audit leaves
/// an existing report untouched.
pub fn run_audit(layout: &ProjectLayout) -> Result<AuditReport> {
    let srs = read_required(&layout.root, &layout.srs_file)?;
    let features = read_required(&layout.root, layout.context_file(ContextFile::Features))?;
    let vision = read_required(&layout.root, layout.context_file(ContextFile::Vision))?;

    let features = declared_features(&features);
    let goals = extract_goals(&vision);
    debug!(features = features.len(), goals = goals.len(), "Loaded audit context");

    let records = Scanner::new(features.clone(), goals).scan(&srs);
    if records.is_empty() {
        return Err(Error::empty_extraction(
            "No requirements found; audit cannot proceed.",
        ));
    }
    info!("Scanned {} requirements", records.len());

    let report = AuditReport::new(records, features);
    write_string_atomic(&layout.audit_report, &report.to_markdown())?;
    info!(
        "Wrote audit report to {}",
        display_relative(&layout.audit_report, &layout.root).display()
    );

    Ok(report)
}
