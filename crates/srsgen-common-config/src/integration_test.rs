//! Loader and environment working together.

use crate::{ConfigLoader, SrsConfig, DEFAULT_ECOSYSTEM};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_full_config_round_trip_through_disk() {
    let dir = tempdir().unwrap();
    let loader = ConfigLoader::new(dir.path());

    let mut config = SrsConfig::default();
    config.project.name = "Gradebook".to_string();
    config.paths.output_dir = PathBuf::from("build");
    config.paths.srs_file = PathBuf::from("build/SRS.md");
    fs::create_dir_all(dir.path().join(".srsgen")).unwrap();
    fs::write(loader.config_path(), serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = loader.load().unwrap();
    assert_eq!(loaded, config);

    let layout = loaded.layout(dir.path());
    assert_eq!(layout.srs_file, dir.path().join("build/SRS.md"));
}

#[test]
fn test_config_with_env_defaults_in_file() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join(".srsgen");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.yaml"),
        "project:\n  name: ${SRSGEN_IT_UNSET_NAME:-Timetabler}\n",
    )
    .unwrap();

    let config = ConfigLoader::new(dir.path()).load().unwrap();
    assert_eq!(config.project.name, "Timetabler");
    assert_eq!(config.project.ecosystem, DEFAULT_ECOSYSTEM);
}

#[test]
fn test_explicit_file_outside_project() {
    let dir = tempdir().unwrap();
    let elsewhere = dir.path().join("alt.yaml");
    fs::write(&elsewhere, "paths:\n  audit_report: out/audit.md\n").unwrap();

    let loader = ConfigLoader::new(dir.path()).with_file(&elsewhere);
    assert_eq!(loader.config_path(), elsewhere);

    let config = loader.load().unwrap();
    assert_eq!(config.paths.audit_report, PathBuf::from("out/audit.md"));
    assert_eq!(config.project.name, "KampusPad");
}
