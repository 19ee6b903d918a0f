use srsgen_common_core::{ErrorCategory, Result};
use srsgen_common_fs as fs;
use tempfile::tempdir;

#[test]
fn test_integration_with_core_types() {
    let dir = tempdir().unwrap();
    let result: Result<String> = fs::read_required(dir.path(), dir.path().join("features.md"));

    let error = result.unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Input);
    assert!(error.to_string().ends_with("features.md"));
}

#[test]
fn test_rewrite_keeps_single_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("output").join("SRS_Draft.md");

    for body in ["# Section 1.0\n", "# Section 1.0\n\n# Section 2.0\n"] {
        fs::write_string_atomic(&target, body).unwrap();
    }

    let files: Vec<_> = std::fs::read_dir(dir.path().join("output"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files, vec![target.clone()]);
    assert_eq!(
        fs::read_text(&target).unwrap(),
        "# Section 1.0\n\n# Section 2.0\n"
    );
}
