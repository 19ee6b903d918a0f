//! Command implementations.

pub mod audit;
pub mod generate;
mod init;

pub use init::{InitCommand, InitMode};
