//! SRS section generators.
//!
//! Each generator is a pure function from parsed context files to rendered
//! sections. [`pipeline::Pipeline`] wires them to the file system: it reads
//! every input first, renders, and splices the result into the cumulative
//! SRS document in canonical section order.

pub mod attributes;
pub mod context;
pub mod descriptive;
pub mod features;
pub mod interfaces;
pub mod intro;
pub mod layout;
pub mod logic;
pub mod pipeline;
pub mod seed;

pub use context::RenderContext;
pub use layout::{LogicSubsection, RenderedSection, RenderedSubsection, SrsSection};
pub use pipeline::{Pipeline, Step, StepReport};
pub use seed::{ContextSeeder, SeedMode, SeedReport};
