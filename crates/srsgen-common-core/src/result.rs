//! Result extensions.

use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for I/O results.
pub trait ResultExt<T> {
    /// Attach the path the I/O operation was working on.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}

/// Return early with an empty-extraction error if the condition is false.
#[macro_export]
macro_rules! ensure_extracted {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::error::Error::empty_extraction($msg));
        }
    };
}
