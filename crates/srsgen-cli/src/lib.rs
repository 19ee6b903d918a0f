//! srsgen CLI library
//!
//! Command tree, output formatting and error reporting for the `srsgen` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompts;

pub use error::CliError;
