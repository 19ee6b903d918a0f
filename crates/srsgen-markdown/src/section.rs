// src/section.rs

//! Section store: a markdown document addressed by heading.
//!
//! The document is kept as a flat list of headings in source order. Each
//! section owns the raw text between its heading line and the next heading of
//! any level. The *span* of a section runs until the next heading at the same
//! or a higher level, so it includes its subsections.
//!
//! Rendering normalizes only the whitespace around sections: edge blank lines
//! of every body are dropped, a blank line separates a non-empty body from the
//! next heading and the document ends with a single newline. A rendered
//! document therefore parses and renders back to the same bytes.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})[ \t]+(\S.*?)[ \t]*$").expect("heading pattern is valid")
});

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(```|~~~)").expect("fence pattern is valid"));

/// Splice failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// The heading handed to a splice is not a markdown heading line.
    #[error("not a markdown heading: {0:?}")]
    InvalidHeading(String),
}

/// A heading and the raw text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading level (number of `#` marks).
    pub level: usize,
    /// Heading text without the `#` marks.
    pub heading: String,
    /// Text between this heading line and the next heading line.
    pub body: String,
    line: String,
}

impl Section {
    /// The heading line as written in the document.
    pub fn heading_line(&self) -> &str {
        &self.line
    }
}

/// Heading lookup key. Leading `#` marks pin the level.
#[derive(Debug, Clone, Copy)]
struct HeadingQuery<'a> {
    level: Option<usize>,
    text: &'a str,
}

impl<'a> HeadingQuery<'a> {
    fn parse(query: &'a str) -> Self {
        let trimmed = query.trim();
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        let rest = &trimmed[hashes..];
        if (1..=6).contains(&hashes) && rest.starts_with(char::is_whitespace) {
            Self {
                level: Some(hashes),
                text: rest.trim(),
            }
        } else {
            Self {
                level: None,
                text: trimmed,
            }
        }
    }

    fn matches(&self, section: &Section) -> bool {
        self.level.map_or(true, |level| level == section.level)
            && section.heading.trim().to_lowercase() == self.text.to_lowercase()
    }
}

/// An ordered set of sections plus the text before the first heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    preamble: String,
    sections: Vec<Section>,
}

impl Document {
    /// Parse markdown text. Headings inside fenced code blocks are body text.
    pub fn parse(text: &str) -> Self {
        let mut doc = Document::default();
        let mut in_fence = false;

        for line in text.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);

            if CODE_FENCE.is_match(content) {
                in_fence = !in_fence;
            } else if !in_fence {
                if let Some(caps) = HEADING.captures(content) {
                    doc.sections.push(Section {
                        level: caps[1].len(),
                        heading: caps[2].to_string(),
                        body: String::new(),
                        line: content.trim().to_string(),
                    });
                    continue;
                }
            }

            match doc.sections.last_mut() {
                Some(section) => section.body.push_str(line),
                None => doc.preamble.push_str(line),
            }
        }

        doc
    }

    /// Text before the first heading.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// All sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no headings.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Whether a section matching `heading` exists.
    pub fn contains(&self, heading: &str) -> bool {
        self.find(heading).is_some()
    }

    /// The first section matching `heading`.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.find(heading).map(|i| &self.sections[i])
    }

    fn find(&self, heading: &str) -> Option<usize> {
        let query = HeadingQuery::parse(heading);
        self.sections.iter().position(|s| query.matches(s))
    }

    fn find_in(&self, range: Range<usize>, heading: &str) -> Option<usize> {
        let query = HeadingQuery::parse(heading);
        range.into_iter().find(|&i| query.matches(&self.sections[i]))
    }

    /// End (exclusive) of the span that starts at `index`.
    fn span_end(&self, index: usize) -> usize {
        let level = self.sections[index].level;
        self.sections[index + 1..]
            .iter()
            .position(|s| s.level <= level)
            .map_or(self.sections.len(), |offset| index + 1 + offset)
    }

    /// First index at or after `index` whose heading is not deeper than
    /// `level`. A section inserted there cannot adopt the sections after it.
    fn skip_deeper(&self, index: usize, level: usize) -> usize {
        self.sections[index..]
            .iter()
            .position(|s| s.level <= level)
            .map_or(self.sections.len(), |offset| index + offset)
    }

    fn span_text(&self, index: usize) -> String {
        let end = self.span_end(index);
        let mut text = self.sections[index].body.clone();
        for section in &self.sections[index + 1..end] {
            text.push_str(&section.line);
            text.push('\n');
            text.push_str(&section.body);
        }
        text.trim().to_string()
    }

    /// Body of the first section matching `heading`, subsections included.
    ///
    /// Returns an empty string when the heading is absent.
    pub fn extract(&self, heading: &str) -> String {
        self.find(heading)
            .map(|i| self.span_text(i))
            .unwrap_or_default()
    }

    /// Body of the first section whose heading contains `keyword`
    /// (case-insensitive).
    pub fn extract_containing(&self, keyword: &str) -> String {
        let keyword = keyword.to_lowercase();
        self.sections
            .iter()
            .position(|s| s.heading.to_lowercase().contains(&keyword))
            .map(|i| self.span_text(i))
            .unwrap_or_default()
    }

    /// Replace the span of `heading` with `heading` + `body`, or insert it
    /// after the span of `anchor`, or append it.
    ///
    /// `heading` must be a full heading line (`# Section 2.0 – ...`).
    pub fn replace_or_insert(
        &mut self,
        heading: &str,
        body: &str,
        anchor: Option<&str>,
    ) -> Result<(), SpliceError> {
        let incoming = fragment(heading, body)?;

        if let Some(i) = self.find(heading) {
            let end = self.span_end(i);
            self.sections.splice(i..end, incoming);
        } else if let Some(a) = anchor.and_then(|a| self.find(a)) {
            let at = self.skip_deeper(self.span_end(a), incoming[0].level);
            self.sections.splice(at..at, incoming);
        } else {
            self.sections.extend(incoming);
        }

        Ok(())
    }

    /// Replace the span of `heading`, or insert it right before `successor`,
    /// or append it.
    pub fn insert_before(
        &mut self,
        heading: &str,
        body: &str,
        successor: Option<&str>,
    ) -> Result<(), SpliceError> {
        let incoming = fragment(heading, body)?;

        if let Some(i) = self.find(heading) {
            let end = self.span_end(i);
            self.sections.splice(i..end, incoming);
        } else if let Some(s) = successor.and_then(|s| self.find(s)) {
            let at = self.skip_deeper(s, incoming[0].level);
            self.sections.splice(at..at, incoming);
        } else {
            self.sections.extend(incoming);
        }

        Ok(())
    }

    /// Replace the child `heading` inside the span of `parent`, or append it
    /// at the end of that span. A missing parent is created at document end.
    ///
    /// Both arguments must be full heading lines.
    pub fn replace_or_insert_within(
        &mut self,
        parent: &str,
        heading: &str,
        body: &str,
    ) -> Result<(), SpliceError> {
        let incoming = fragment(heading, body)?;

        let p = match self.find(parent) {
            Some(p) => p,
            None => {
                self.sections.extend(fragment(parent, "")?);
                self.sections.len() - 1
            }
        };
        let end = self.span_end(p);

        match self.find_in(p + 1..end, heading) {
            Some(child) => {
                let child_end = self.span_end(child).min(end);
                self.sections.splice(child..child_end, incoming);
            }
            None => {
                self.sections.splice(end..end, incoming);
            }
        }

        Ok(())
    }

    /// Render back to markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        let preamble = trim_blank_edges(&self.preamble);
        if !preamble.is_empty() {
            out.push_str(preamble);
            out.push('\n');
            if !self.sections.is_empty() {
                out.push('\n');
            }
        }

        let last = self.sections.len().saturating_sub(1);
        for (i, section) in self.sections.iter().enumerate() {
            out.push_str(&section.line);
            out.push('\n');

            let body = trim_blank_edges(&section.body);
            if !body.is_empty() {
                out.push_str(body);
                out.push('\n');
                if i < last {
                    out.push('\n');
                }
            }
        }

        out
    }
}

/// Parse `heading` + `body` into the sections it introduces.
fn fragment(heading: &str, body: &str) -> Result<Vec<Section>, SpliceError> {
    let heading = heading.trim();
    let parsed = Document::parse(&format!("{heading}\n{body}"));
    if parsed.sections.is_empty() || !parsed.preamble.trim().is_empty() {
        return Err(SpliceError::InvalidHeading(heading.to_string()));
    }
    Ok(parsed.sections)
}

/// Drop blank lines at both ends while keeping the indentation of the first
/// content line.
fn trim_blank_edges(text: &str) -> &str {
    let text = text.trim_end();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &text[start..]
}

/// Body of `heading` in `document`, or an empty string.
pub fn extract(document: &str, heading: &str) -> String {
    Document::parse(document).extract(heading)
}

/// Splice `heading` + `body` into `document`. See [`Document::replace_or_insert`].
pub fn replace_or_insert(
    document: &str,
    heading: &str,
    body: &str,
    anchor: Option<&str>,
) -> Result<String, SpliceError> {
    let mut doc = Document::parse(document);
    doc.replace_or_insert(heading, body, anchor)?;
    Ok(doc.to_markdown())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SRS: &str = "\
# Section 1.0 – Introduction
Intro text.

## 1.1 Purpose
Purpose text.

# Section 2.0 – Descriptive Modeling
Old descriptive body.

### 2.1 Product Perspective
Old perspective.

# Section 3.1 – Interface Specification
Interfaces body.
";

    #[test]
    fn test_parse_levels_and_preamble() {
        let doc = Document::parse("Title text\n\n# One\nbody\n## Two\n");
        assert_eq!(doc.preamble(), "Title text\n\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.sections()[0].level, 1);
        assert_eq!(doc.sections()[1].heading, "Two");
        assert_eq!(doc.sections()[1].heading_line(), "## Two");
    }

    #[test]
    fn test_headings_inside_code_fences_are_ignored() {
        let doc = Document::parse("# Real\n```bash\n# not a heading\n```\ntext\n");
        assert_eq!(doc.len(), 1);
        assert!(doc.sections()[0].body.contains("# not a heading"));
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let doc = Document::parse("#hashtag\n");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_extract_is_case_insensitive_and_includes_subsections() {
        let body = extract(SRS, "section 2.0 – descriptive modeling");
        assert!(body.starts_with("Old descriptive body."));
        assert!(body.contains("### 2.1 Product Perspective"));
        assert!(!body.contains("Interfaces body"));
    }

    #[test]
    fn test_extract_with_level_pin() {
        let text = "# Constraints\ntop\n## Constraints\nnested\n";
        assert_eq!(extract(text, "## Constraints"), "nested");
        assert!(extract(text, "Constraints").starts_with("top"));
    }

    #[test]
    fn test_extract_missing_heading_is_empty() {
        assert_eq!(extract(SRS, "Section 9.9"), "");
        assert_eq!(extract("", "anything"), "");
    }

    #[test]
    fn test_extract_stops_at_same_level_only() {
        let text = "## 1. Problem Statement\nLine one.\n### Detail\nmore\n## 2. Next\nother\n";
        let body = extract(text, "## 1. Problem Statement");
        assert!(body.contains("more"));
        assert!(!body.contains("other"));
    }

    #[test]
    fn test_extract_containing() {
        let rules = "# Rules\n## Key Decision Points\n- Refund: if late then refund\n## Calculations\n- Fee = base * 2\n";
        let doc = Document::parse(rules);
        assert_eq!(doc.extract_containing("decision points"), "- Refund: if late then refund");
        assert_eq!(doc.extract_containing("CALCULATIONS"), "- Fee = base * 2");
        assert_eq!(doc.extract_containing("absent"), "");
    }

    #[test]
    fn test_replace_keeps_following_section_in_place() {
        let out = replace_or_insert(
            SRS,
            "# Section 2.0 – Descriptive Modeling",
            "New descriptive body.",
            Some("# Section 1.0 – Introduction"),
        )
        .unwrap();

        assert!(!out.contains("Old descriptive body."));
        assert!(!out.contains("Old perspective."));
        let new_pos = out.find("New descriptive body.").unwrap();
        let next_pos = out.find("# Section 3.1 – Interface Specification").unwrap();
        assert!(new_pos < next_pos);
        assert!(out.ends_with("Interfaces body.\n"));
        assert!(out.contains("## 1.1 Purpose\nPurpose text.\n\n# Section 2.0"));
    }

    #[test]
    fn test_insert_after_anchor_span() {
        let text = "# A\na\n## A.1\nchild\n# C\nc\n";
        let out = replace_or_insert(text, "# B", "b", Some("# A")).unwrap();
        assert_eq!(out, "# A\na\n\n## A.1\nchild\n\n# B\nb\n\n# C\nc\n");
    }

    #[test]
    fn test_insert_after_anchor_skips_deeper_siblings() {
        let text = "## S0\nkeep zero\n\n## S1\nkeep one\n";
        let once = replace_or_insert(text, "# Generated", "gen", Some("S0")).unwrap();
        assert_eq!(once, "## S0\nkeep zero\n\n## S1\nkeep one\n\n# Generated\ngen\n");

        let twice = replace_or_insert(&once, "# Generated", "gen", Some("S0")).unwrap();
        assert_eq!(once, twice);
        assert!(twice.contains("keep one"));
    }

    #[test]
    fn test_insert_before_deeper_successor_keeps_it() {
        let mut doc = Document::parse("## Details\nkept\n# Next\nnext\n");
        doc.insert_before("# Overview", "ov", Some("## Details")).unwrap();
        let once = doc.to_markdown();
        assert_eq!(once, "## Details\nkept\n\n# Overview\nov\n\n# Next\nnext\n");

        doc.insert_before("# Overview", "ov", Some("## Details")).unwrap();
        assert_eq!(doc.to_markdown(), once);
    }

    #[test]
    fn test_append_when_anchor_missing() {
        let out = replace_or_insert("# A\na\n", "# B", "b", Some("# Nope")).unwrap();
        assert_eq!(out, "# A\na\n\n# B\nb\n");
        let out = replace_or_insert("", "# B", "b", None).unwrap();
        assert_eq!(out, "# B\nb\n");
    }

    #[test]
    fn test_insert_before_successor() {
        let mut doc = Document::parse("# Section 3.1 – Interface Specification\nbody\n");
        doc.insert_before(
            "# Section 1.0 – Introduction",
            "intro",
            Some("# Section 3.1 – Interface Specification"),
        )
        .unwrap();
        assert_eq!(
            doc.to_markdown(),
            "# Section 1.0 – Introduction\nintro\n\n# Section 3.1 – Interface Specification\nbody\n"
        );
    }

    #[test]
    fn test_replace_is_idempotent() {
        let once = replace_or_insert(SRS, "# Section 3.3 – Performance", "fast", Some("# Section 3.1 – Interface Specification")).unwrap();
        let twice = replace_or_insert(&once, "# Section 3.3 – Performance", "fast", Some("# Section 3.1 – Interface Specification")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nested_splice_appends_then_replaces() {
        let mut doc = Document::parse("# Section 3.2 – Feature Decomposition\n### 3.2.1 Login\nlogin\n# Section 3.3 – Performance Requirements\nperf\n");
        let parent = "# Section 3.2 – Feature Decomposition";

        doc.replace_or_insert_within(parent, "### 3.2.2 Process Descriptions", "v1").unwrap();
        let first = doc.to_markdown();
        assert!(first.contains("login\n\n### 3.2.2 Process Descriptions\nv1\n\n# Section 3.3"));

        doc.replace_or_insert_within(parent, "### 3.2.2 Process Descriptions", "v2").unwrap();
        let second = doc.to_markdown();
        assert!(second.contains("### 3.2.2 Process Descriptions\nv2\n"));
        assert!(!second.contains("v1"));
        assert_eq!(second.matches("3.2.2 Process Descriptions").count(), 1);
    }

    #[test]
    fn test_nested_splice_creates_missing_parent() {
        let mut doc = Document::parse("# Section 1.0 – Introduction\nintro\n");
        doc.replace_or_insert_within(
            "# Section 3.2 – Feature Decomposition",
            "### 3.2.4 Data Dictionary",
            "| Name |",
        )
        .unwrap();
        assert_eq!(
            doc.to_markdown(),
            "# Section 1.0 – Introduction\nintro\n\n# Section 3.2 – Feature Decomposition\n### 3.2.4 Data Dictionary\n| Name |\n"
        );
    }

    #[test]
    fn test_invalid_heading_is_rejected() {
        let err = replace_or_insert("# A\n", "Section 2.0", "body", None).unwrap_err();
        assert_eq!(err, SpliceError::InvalidHeading("Section 2.0".to_string()));
    }

    #[test]
    fn test_render_normalizes_surrounding_whitespace() {
        let doc = Document::parse("\n\n# A\n\n\ntext\n\n\n\n# B\n\n");
        assert_eq!(doc.to_markdown(), "# A\ntext\n\n# B\n");
    }

    fn arb_document() -> impl Strategy<Value = String> {
        prop::collection::vec(
            (1usize..=3, prop::collection::vec("[a-z][a-z ]{0,12}", 0..3)),
            0..8,
        )
        .prop_map(|sections| {
            let mut text = String::new();
            for (i, (level, lines)) in sections.into_iter().enumerate() {
                text.push_str(&"#".repeat(level));
                text.push_str(&format!(" S{i}\n"));
                for line in lines {
                    text.push_str(&line);
                    text.push('\n');
                }
                text.push('\n');
            }
            text
        })
    }

    proptest! {
        #[test]
        fn prop_render_is_a_fixed_point(text in arb_document()) {
            let once = Document::parse(&text).to_markdown();
            let twice = Document::parse(&once).to_markdown();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_splice_is_idempotent(text in arb_document(), body in "[a-z ]{0,20}") {
            let once = replace_or_insert(&text, "# Generated", &body, Some("S0")).unwrap();
            let twice = replace_or_insert(&once, "# Generated", &body, Some("S0")).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_splice_leaves_other_top_level_sections_alone(text in arb_document(), body in "[a-z]{1,10}") {
            let before = Document::parse(&Document::parse(&text).to_markdown());
            let targets: Vec<String> = before
                .sections()
                .iter()
                .filter(|s| s.level == 1)
                .map(|s| s.heading_line().to_string())
                .collect();
            prop_assume!(!targets.is_empty());

            let target = &targets[0];
            let mut after = before.clone();
            after.replace_or_insert(target, &body, None).unwrap();

            for other in targets.iter().skip(1) {
                prop_assert_eq!(before.extract(other), after.extract(other));
            }
        }
    }
}
