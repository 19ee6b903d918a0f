// src/keywords.rs

//! Fixed-vocabulary keyword, actor and entity detection.
//!
//! Every detector is a pure function of its input text. Nothing here fails on
//! missing terms; callers skip whatever depends on an absent keyword.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::table::TableRow;

/// Infrastructure terms that steer the descriptive and interface sections.
pub const INFRASTRUCTURE_TERMS: [&str; 11] = [
    "Ubuntu",
    "Debian",
    "OCI",
    "MySQL",
    "PostgreSQL",
    "HP Z440",
    "NVMe",
    "RAM",
    "TPM",
    "Bluetooth",
    "BLE",
];

/// Ambiguous wording flagged by the audit.
pub const WEAK_WORDS: [&str; 12] = [
    "should",
    "might",
    "could",
    "may",
    "possibly",
    "preferably",
    "ideally",
    "somewhat",
    "user-friendly",
    "highly",
    "intelligent",
    "optimized",
];

/// Actors used when no user story names one.
pub const FALLBACK_ACTORS: [&str; 3] = ["Product Owner", "Systems Engineer", "QA Lead"];

/// Entities used when the business rules name none.
pub const FALLBACK_ENTITIES: [&str; 3] = ["TenantRecord", "TutorSession", "PaymentEvent"];

static INFRASTRUCTURE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&INFRASTRUCTURE_TERMS).expect("infrastructure vocabulary is valid")
});

static WEAK: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&WEAK_WORDS).expect("weak-word vocabulary is valid"));

static ACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"As an? ([^,.]+)").expect("actor pattern is valid"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+(?:Record|Session|Entity|Account|Profile|Event|Payment)\b")
        .expect("entity pattern is valid")
});

static INTERMITTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)intermittent\s+connectivity").expect("pattern is valid"));

static POWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)power\s+instability").expect("pattern is valid"));

/// A vocabulary matched case-insensitively on word boundaries.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    terms: Vec<(String, Regex)>,
}

/// Per-term matching lines, in vocabulary order. Terms without a match are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    found: Vec<(String, Vec<String>)>,
}

impl KeywordSet {
    /// Compile a vocabulary.
    pub fn new(terms: &[&str]) -> Result<Self, regex::Error> {
        let terms = terms
            .iter()
            .map(|term| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
                Regex::new(&pattern).map(|re| (term.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { terms })
    }

    /// The built-in infrastructure vocabulary.
    pub fn infrastructure() -> &'static KeywordSet {
        &INFRASTRUCTURE
    }

    /// The built-in weak-word vocabulary.
    pub fn weak_words() -> &'static KeywordSet {
        &WEAK
    }

    /// Terms present anywhere in `text`, in vocabulary order.
    pub fn terms_in(&self, text: &str) -> Vec<&str> {
        self.terms
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.as_str())
            .collect()
    }

    /// Lines of `text` mentioning each term.
    pub fn detect_lines(&self, text: &str) -> KeywordMatches {
        let found = self
            .terms
            .iter()
            .filter_map(|(term, re)| {
                let lines: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && re.is_match(line))
                    .map(|line| line.replace('\t', " "))
                    .collect();
                (!lines.is_empty()).then(|| (term.clone(), lines))
            })
            .collect();
        KeywordMatches { found }
    }
}

impl KeywordMatches {
    /// Whether `term` matched at least once.
    pub fn contains(&self, term: &str) -> bool {
        self.found.iter().any(|(t, _)| t == term)
    }

    /// Lines that mentioned `term`.
    pub fn lines(&self, term: &str) -> &[String] {
        self.found
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, lines)| lines.as_slice())
            .unwrap_or(&[])
    }

    /// Matched terms in vocabulary order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.found.iter().map(|(t, _)| t.as_str())
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Case-insensitive substring test.
pub fn mentions(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Actors named by `As a ...` / `As an ...` in the `User Story` column,
/// de-duplicated and sorted.
pub fn extract_actors(rows: &[TableRow]) -> Vec<String> {
    let mut actors: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.get("User Story"))
        .filter_map(|story| ACTOR.captures(story))
        .map(|caps| caps[1].trim().to_string())
        .filter(|actor| !actor.is_empty())
        .collect();

    if actors.is_empty() {
        actors.extend(FALLBACK_ACTORS.iter().map(|a| a.to_string()));
    }
    actors.into_iter().collect()
}

/// CamelCase domain entities (`TenantRecord`, `UserProfile`, ...).
pub fn detect_entities(text: &str) -> BTreeSet<String> {
    let mut entities: BTreeSet<String> = ENTITY
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    if entities.is_empty() {
        entities.extend(FALLBACK_ENTITIES.iter().map(|e| e.to_string()));
    }
    entities
}

/// Operating-environment hazards named in the text.
pub fn detect_environment(text: &str) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if INTERMITTENT.is_match(text) {
        flags.push("Intermittent Connectivity");
    }
    if POWER.is_match(text) {
        flags.push("Power Instability");
    }
    flags
}
