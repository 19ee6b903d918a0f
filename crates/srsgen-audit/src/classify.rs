//! Keyword classification of requirement sentences.
//!
//! Buckets are checked in declaration order and the first match wins, so a
//! sentence mentioning both latency and encryption is tagged Performance
//! Efficiency.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use srsgen_markdown::KeywordSet;

static MEASURABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:(?:ms|seconds?|minutes?|s)\b|%)")
        .expect("measurable pattern is valid")
});

static PRECISION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:round|precision|two decimal)").expect("precision pattern is valid")
});

/// Word-start keyword buckets, in precedence order.
static QUALITY_BUCKETS: LazyLock<Vec<(QualityCharacteristic, Regex)>> = LazyLock::new(|| {
    [
        (
            QualityCharacteristic::PerformanceEfficiency,
            r"(?i)\b(?:performance|response|respond|latency|throughput|load|seconds?\b|ms\b)|\dms\b",
        ),
        (
            QualityCharacteristic::Reliability,
            r"(?i)\b(?:reliability|fail|fault|recover|uptime|availability)",
        ),
        (
            QualityCharacteristic::Availability,
            r"(?i)\b(?:availability|downtime|failover)",
        ),
        (
            QualityCharacteristic::Security,
            r"(?i)\b(?:security|encrypt|rbac|access control|audit|auth)",
        ),
        (
            QualityCharacteristic::Maintainability,
            r"(?i)\b(?:maintain|documentation|modular|traceability|refactor|analysis)",
        ),
    ]
    .into_iter()
    .map(|(tag, pattern)| (tag, Regex::new(pattern).expect("quality bucket pattern is valid")))
    .collect()
});

static VERIFICATION_BUCKETS: LazyLock<Vec<(VerificationMethod, Regex)>> = LazyLock::new(|| {
    [
        (VerificationMethod::Test, r"(?i)\b(?:test|latency|verify)"),
        (VerificationMethod::Inspection, r"(?i)\b(?:inspect|log|audit)"),
    ]
    .into_iter()
    .map(|(method, pattern)| (method, Regex::new(pattern).expect("verification pattern is valid")))
    .collect()
});

static DESIGN_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:module|class|interface|implementation)|\bUI\b").expect("design term pattern is valid")
});

/// ISO/IEC 25010 quality characteristic assigned to a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityCharacteristic {
    PerformanceEfficiency,
    Reliability,
    Availability,
    Security,
    Maintainability,
    FunctionalSuitability,
}

impl QualityCharacteristic {
    /// Tag for `text`; Functional Suitability when no bucket matches.
    pub fn classify(text: &str) -> Self {
        QUALITY_BUCKETS
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map_or(Self::FunctionalSuitability, |(tag, _)| *tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PerformanceEfficiency => "Performance Efficiency",
            Self::Reliability => "Reliability",
            Self::Availability => "Availability",
            Self::Security => "Security",
            Self::Maintainability => "Maintainability",
            Self::FunctionalSuitability => "Functional Suitability",
        }
    }
}

impl fmt::Display for QualityCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a requirement is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerificationMethod {
    Test,
    Inspection,
    Demonstration,
}

impl VerificationMethod {
    /// Method for `text`; Demonstration when no bucket matches.
    pub fn classify(text: &str) -> Self {
        VERIFICATION_BUCKETS
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map_or(Self::Demonstration, |(method, _)| *method)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Inspection => "Inspection",
            Self::Demonstration => "Demonstration",
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weak-wording vocabulary terms present in `text`.
pub fn weak_words(text: &str) -> Vec<String> {
    KeywordSet::weak_words()
        .terms_in(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Whether `text` carries a numeric target with a unit, a percentage, or a
/// rounding rule.
pub fn is_measurable(text: &str) -> bool {
    MEASURABLE.is_match(text) || PRECISION.is_match(text)
}

/// Whether `text` names a design element rather than behavior.
pub fn mentions_design(text: &str) -> bool {
    DESIGN_TERMS.is_match(text)
}
