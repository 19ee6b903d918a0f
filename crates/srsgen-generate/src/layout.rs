//! Canonical SRS section layout and splicing.
//!
//! New sections are placed after the nearest section that precedes them in
//! canonical order. When none exists they go before the nearest successor,
//! and otherwise at the end of the document.

use serde::Serialize;
use srsgen_common_core::{Error, Result};
use srsgen_markdown::{Document, SpliceError};

/// Top-level SRS sections, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SrsSection {
    Introduction,
    DescriptiveModeling,
    InterfaceSpecification,
    FeatureDecomposition,
    PerformanceRequirements,
    DesignConstraints,
    SoftwareSystemAttributes,
}

impl SrsSection {
    /// Every section in document order.
    pub const ORDER: [SrsSection; 7] = [
        SrsSection::Introduction,
        SrsSection::DescriptiveModeling,
        SrsSection::InterfaceSpecification,
        SrsSection::FeatureDecomposition,
        SrsSection::PerformanceRequirements,
        SrsSection::DesignConstraints,
        SrsSection::SoftwareSystemAttributes,
    ];

    /// Full heading line.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Introduction => "# Section 1.0 – Introduction",
            Self::DescriptiveModeling => "# Section 2.0 – Descriptive Modeling",
            Self::InterfaceSpecification => "# Section 3.1 – Interface Specification",
            Self::FeatureDecomposition => "# Section 3.2 – Feature Decomposition",
            Self::PerformanceRequirements => "# Section 3.3 – Performance Requirements",
            Self::DesignConstraints => "# Section 3.4 – Design Constraints",
            Self::SoftwareSystemAttributes => "# Section 3.5 – Software System Attributes",
        }
    }

    /// Section number as printed in the heading.
    pub fn number(&self) -> &'static str {
        match self {
            Self::Introduction => "1.0",
            Self::DescriptiveModeling => "2.0",
            Self::InterfaceSpecification => "3.1",
            Self::FeatureDecomposition => "3.2",
            Self::PerformanceRequirements => "3.3",
            Self::DesignConstraints => "3.4",
            Self::SoftwareSystemAttributes => "3.5",
        }
    }

    fn position(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or(Self::ORDER.len())
    }
}

/// Logic-modeling subsections nested inside Section 3.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicSubsection {
    ProcessDescriptions,
    DataConstructSpecifications,
    DataDictionary,
}

impl LogicSubsection {
    pub const ORDER: [LogicSubsection; 3] = [
        LogicSubsection::ProcessDescriptions,
        LogicSubsection::DataConstructSpecifications,
        LogicSubsection::DataDictionary,
    ];

    /// Full heading line.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::ProcessDescriptions => "### 3.2.2 Process Descriptions",
            Self::DataConstructSpecifications => "### 3.2.3 Data Construct Specifications",
            Self::DataDictionary => "### 3.2.4 Data Dictionary",
        }
    }
}

/// A generated top-level section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub section: SrsSection,
    pub body: String,
}

impl RenderedSection {
    pub fn new(section: SrsSection, body: impl Into<String>) -> Self {
        Self {
            section,
            body: body.into(),
        }
    }

    /// Heading plus body as standalone markdown.
    pub fn to_markdown(&self) -> String {
        format!("{}\n{}\n", self.section.heading(), self.body.trim_end())
    }
}

/// A generated subsection of Section 3.2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSubsection {
    pub subsection: LogicSubsection,
    pub body: String,
}

impl RenderedSubsection {
    pub fn new(subsection: LogicSubsection, body: impl Into<String>) -> Self {
        Self {
            subsection,
            body: body.into(),
        }
    }
}

fn splice_error(e: SpliceError) -> Error {
    Error::template(e.to_string())
}

/// Replace or insert `rendered` in canonical position.
pub fn splice_section(doc: &mut Document, rendered: &RenderedSection) -> Result<()> {
    let heading = rendered.section.heading();

    if doc.contains(heading) {
        return doc
            .replace_or_insert(heading, &rendered.body, None)
            .map_err(splice_error);
    }

    let index = rendered.section.position();
    let predecessor = SrsSection::ORDER[..index]
        .iter()
        .rev()
        .find(|s| doc.contains(s.heading()));

    match predecessor {
        Some(anchor) => doc
            .replace_or_insert(heading, &rendered.body, Some(anchor.heading()))
            .map_err(splice_error),
        None => {
            let successor = SrsSection::ORDER[index + 1..]
                .iter()
                .find(|s| doc.contains(s.heading()))
                .map(|s| s.heading());
            doc.insert_before(heading, &rendered.body, successor)
                .map_err(splice_error)
        }
    }
}

/// Replace or append `rendered` inside Section 3.2, creating an empty
/// Section 3.2 in canonical position first if needed.
pub fn splice_subsection(doc: &mut Document, rendered: &RenderedSubsection) -> Result<()> {
    let parent = SrsSection::FeatureDecomposition;
    if !doc.contains(parent.heading()) {
        splice_section(doc, &RenderedSection::new(parent, ""))?;
    }
    doc.replace_or_insert_within(parent.heading(), rendered.subsection.heading(), &rendered.body)
        .map_err(splice_error)
}
