//! File system utilities for srsgen.
//!
//! Every pipeline step reads its context files whole, computes, and writes the
//! whole output back. Reads report missing inputs relative to the project root;
//! writes go through a temporary sibling and a rename so an interrupted run
//! never leaves a truncated document behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use srsgen_common_core::{Error, Result, ResultExt};
use srsgen_common_log::spans::file_span;
use tracing::{debug, info};

pub mod path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a required input file.
///
/// A missing file yields [`Error::MissingInput`] naming `path` relative to `root`.
pub fn read_required(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<String> {
    let root = root.as_ref();
    let path = path.as_ref();
    let shown = path::display_relative(path, root);
    let _span = file_span("read", &shown.to_string_lossy()).entered();

    if !path.is_file() {
        return Err(Error::missing_input(shown));
    }

    info!("Reading {}", shown.display());
    read_text(path)
}

/// Read a file if it exists.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(Some(decode(path, bytes)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Read a file as UTF-8 text, dropping a leading byte-order mark.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_path(path)?;
    decode(path, bytes)
}

fn decode(path: &Path, bytes: Vec<u8>) -> Result<String> {
    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    String::from_utf8(bytes)
        .map_err(|e| Error::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let _span = file_span("write", &path.to_string_lossy()).entered();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => temp_path.push(".tmp"),
    }

    let written = write_temp(&temp_path, contents)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

fn write_temp(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).with_path(temp_path)?;
    file.write_all(contents).with_path(temp_path)?;
    file.sync_all().with_path(temp_path)
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Write `contents` only when `path` does not exist yet. Returns whether it wrote.
pub fn write_if_absent(path: impl AsRef<Path>, contents: &str) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    write_string_atomic(path, contents)?;
    Ok(true)
}

/// Ensure a directory exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path).with_path(path)?;
    }
    Ok(())
}

/// Delete a directory tree if it exists. Returns whether anything was removed.
pub fn remove_dir_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).with_path(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use srsgen_common_core::ErrorCategory;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");

        write_string_atomic(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        write_string_atomic(&path, "world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "world");
        assert!(!dir.path().join(".test.txt.tmp").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("SRS_Draft.md");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let err = write_string_atomic(&path, "# Section 1.0\n").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::FileSystem);
        assert!(!dir.path().join(".SRS_Draft.md.tmp").exists());
        assert!(path.join("occupied").is_file());
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output/SRS_Draft.md");

        write_string_atomic(&path, "# Section 1.0\n").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("a/b/c");

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());

        ensure_dir(&nested_path).unwrap();
        assert!(nested_path.is_dir());
    }

    #[test]
    fn test_read_required_reports_relative_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project_context/vision.md");

        let err = read_required(dir.path(), &path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(
            err.to_string(),
            format!(
                "Required context file missing: {}",
                Path::new("project_context").join("vision.md").display()
            )
        );
    }

    #[test]
    fn test_read_strips_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.md");
        fs::write(&path, b"\xEF\xBB\xBF# Title\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maybe.md");
        assert!(read_optional(&path).unwrap().is_none());

        fs::write(&path, "x").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_write_if_absent_keeps_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vision.md");

        assert!(write_if_absent(&path, "first").unwrap());
        assert!(!write_if_absent(&path, "second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_remove_dir_if_exists() {
        let dir = tempdir().unwrap();
        let ctx = dir.path().join("ctx");
        ensure_dir(ctx.join("sub")).unwrap();
        fs::write(ctx.join("a.md"), "").unwrap();

        assert!(remove_dir_if_exists(&ctx).unwrap());
        assert!(!remove_dir_if_exists(&ctx).unwrap());
    }
}
