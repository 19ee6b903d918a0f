//! Markdown plumbing for srsgen.
//!
//! This crate provides the section store used to splice generated SRS
//! sections into a cumulative document, pipe-table extraction, bullet
//! extraction and the fixed-vocabulary keyword detectors.

pub mod bullets;
pub mod keywords;
pub mod section;
pub mod table;

pub use bullets::*;
pub use keywords::*;
pub use section::*;
pub use table::*;
