//! Configuration for srsgen.
//!
//! Settings come from `.srsgen/config.yaml` (optional), the environment
//! and command-line flags, with later sources overriding earlier ones.

pub mod env;
pub mod loader;
pub mod types;

#[cfg(test)]
mod integration_test;

pub use env::*;
pub use loader::*;
pub use types::*;
