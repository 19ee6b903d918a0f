//! srsgen common core types and utilities.

pub mod error;
pub mod result;

pub use error::{Error, ErrorCategory, Result};
pub use result::ResultExt;
