//! Requirement scanning.
//!
//! Every line containing "the system shall" becomes a [`RequirementRecord`],
//! numbered in document order.

use serde::Serialize;
use srsgen_markdown::extract_rows;

use crate::classify::{is_measurable, weak_words, QualityCharacteristic, VerificationMethod};

const TRIGGER: &str = "the system shall";

/// Feature name for requirements no declared feature claims.
pub const GENERAL_FEATURE: &str = "General";

/// Goal quoted when the vision names none.
pub const DEFAULT_GOAL: &str = "Vision and stakeholder goals";

/// A feature declared in `features.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredFeature {
    pub name: String,
    pub user_story: String,
}

/// Named features of `features.md`, in table order.
pub fn declared_features(features: &str) -> Vec<DeclaredFeature> {
    extract_rows(features)
        .iter()
        .filter_map(|row| {
            Some(DeclaredFeature {
                name: row.first_of(&["Feature Name"])?.to_string(),
                user_story: row.get_or("User Story", "").to_string(),
            })
        })
        .collect()
}

/// Goal, need and objective statements of `vision.md`. Headings and table
/// lines are skipped.
pub fn extract_goals(vision: &str) -> Vec<String> {
    let goals: Vec<String> = vision
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('|'))
        .map(|line| line.trim_start_matches(['-', ' ']).trim())
        .filter(|line| {
            let lower = line.to_lowercase();
            !line.is_empty()
                && ["goal", "need", "objective"].iter().any(|k| lower.contains(k))
        })
        .map(str::to_string)
        .collect();

    if goals.is_empty() {
        vec![DEFAULT_GOAL.to_string()]
    } else {
        goals
    }
}

/// One classified normative sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementRecord {
    /// `R-REQ-NNN`, sequential from 1.
    pub id: String,
    pub text: String,
    /// Most recent heading line above the requirement.
    pub originating_section: String,
    pub weak_word_flags: Vec<String>,
    pub has_measurable_target: bool,
    pub assigned_feature: String,
    /// User story of the assigned feature, or the first vision goal.
    pub source: String,
    pub quality_tag: QualityCharacteristic,
    pub verification_method: VerificationMethod,
}

impl RequirementRecord {
    /// Whether no declared feature claims this requirement.
    pub fn is_orphan(&self) -> bool {
        self.assigned_feature == GENERAL_FEATURE
    }

    /// Whether the ambiguity report lists this requirement.
    pub fn is_ambiguous(&self) -> bool {
        !self.weak_word_flags.is_empty() || !self.has_measurable_target
    }
}

/// Scans an SRS against the declared features and vision goals.
#[derive(Debug, Clone)]
pub struct Scanner {
    features: Vec<DeclaredFeature>,
    goals: Vec<String>,
}

impl Scanner {
    pub fn new(features: Vec<DeclaredFeature>, goals: Vec<String>) -> Self {
        let goals = if goals.is_empty() {
            vec![DEFAULT_GOAL.to_string()]
        } else {
            goals
        };
        Self { features, goals }
    }

    /// First declared feature whose name occurs in `text`.
    pub fn assign_feature(&self, text: &str) -> Option<&DeclaredFeature> {
        let lower = text.to_lowercase();
        self.features
            .iter()
            .find(|f| lower.contains(&f.name.to_lowercase()))
    }

    /// Every requirement in `srs`, in document order.
    pub fn scan(&self, srs: &str) -> Vec<RequirementRecord> {
        let mut section = "Unknown Section".to_string();
        let mut records = Vec::new();

        for line in srs.lines() {
            let stripped = line.trim();
            if stripped.starts_with('#') {
                section = stripped.to_string();
            }
            if !stripped.to_lowercase().contains(TRIGGER) {
                continue;
            }

            let mut text = stripped.trim_start_matches(['-', ' ']).trim().to_string();
            if !text.ends_with('.') {
                text.push('.');
            }

            let feature = self.assign_feature(&text);
            let source = feature
                .map(|f| f.user_story.as_str())
                .filter(|story| !story.is_empty())
                .unwrap_or(self.goals[0].as_str())
                .to_string();

            records.push(RequirementRecord {
                id: format!("R-REQ-{:03}", records.len() + 1),
                originating_section: section.clone(),
                weak_word_flags: weak_words(&text),
                has_measurable_target: is_measurable(&text),
                assigned_feature: feature.map_or(GENERAL_FEATURE, |f| f.name.as_str()).to_string(),
                source,
                quality_tag: QualityCharacteristic::classify(&text),
                verification_method: VerificationMethod::classify(&text),
                text,
            });
        }

        records
    }
}
