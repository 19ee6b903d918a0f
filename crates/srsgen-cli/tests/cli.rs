//! End-to-end runs of the `srsgen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// A project root seeded with `srsgen init`.
struct Project {
    dir: TempDir,
}

impl Project {
    fn empty() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn seeded() -> Self {
        let project = Self::empty();
        project.srsgen(&["init", "--mode", "maintenance"]).assert().success();
        project
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn srsgen(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("srsgen").unwrap();
        cmd.current_dir(self.path())
            .env_remove("SRS_PROJECT_NAME")
            .env_remove("SRSGEN_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .args(args);
        cmd
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).unwrap()
    }
}

#[test]
fn test_no_args_prints_help() {
    Project::empty()
        .srsgen(&[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_init_seeds_context() {
    let project = Project::empty();
    project
        .srsgen(&["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 6 context file(s), kept 0 (maintenance mode)"));

    assert!(project.path().join("project_context/features.md").is_file());
    assert!(project.path().join("output").is_dir());
    assert!(project.read("project_context/vision.md").contains("KampusPad"));
}

#[test]
fn test_init_maintenance_keeps_edits_and_clean_restores() {
    let project = Project::seeded();
    fs::write(project.path().join("project_context/glossary.md"), "edited\n").unwrap();

    project
        .srsgen(&["init", "--mode", "maintenance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 6"));
    assert_eq!(project.read("project_context/glossary.md"), "edited\n");

    project.srsgen(&["init", "--mode", "clean"]).assert().success();
    assert_ne!(project.read("project_context/glossary.md"), "edited\n");
}

#[test]
fn test_project_name_flag_reaches_templates() {
    let project = Project::empty();
    project
        .srsgen(&["--project-name", "Tutorly", "init"])
        .assert()
        .success();
    assert!(project.read("project_context/vision.md").contains("Tutorly"));
}

#[test]
fn test_project_name_env() {
    let project = Project::empty();
    project
        .srsgen(&["init"])
        .env("SRS_PROJECT_NAME", "Enrolio")
        .assert()
        .success();
    assert!(project.read("project_context/vision.md").contains("Enrolio"));
}

#[test]
fn test_step_reports_updated_section() {
    let project = Project::seeded();
    project
        .srsgen(&["introduction"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Updated output/SRS_Draft.md with Section 1.0 – Introduction",
        ));
    assert!(project
        .read("output/SRS_Draft.md")
        .starts_with("# Section 1.0 – Introduction"));
}

#[test]
fn test_all_then_rerun_is_byte_identical() {
    let project = Project::seeded();
    project
        .srsgen(&["all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote audit report to Audit_Report.md"));

    let srs = project.read("output/SRS_Draft.md");
    let report = project.read("Audit_Report.md");
    assert!(report.starts_with("# Semantic Auditing Report\n"));

    project.srsgen(&["all"]).assert().success();
    assert_eq!(project.read("output/SRS_Draft.md"), srs);
    assert_eq!(project.read("Audit_Report.md"), report);
}

#[test]
fn test_missing_context_file_exits_one_and_keeps_output() {
    let project = Project::seeded();
    project.srsgen(&["introduction"]).assert().success();
    let before = project.read("output/SRS_Draft.md");

    fs::remove_file(project.path().join("project_context/glossary.md")).unwrap();
    project
        .srsgen(&["introduction"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Required context file missing: project_context/glossary.md",
        ));

    assert_eq!(project.read("output/SRS_Draft.md"), before);
}

#[test]
fn test_audit_without_srs_fails() {
    let project = Project::seeded();
    project
        .srsgen(&["audit"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Required context file missing: output/SRS_Draft.md",
        ));
    assert!(!project.path().join("Audit_Report.md").exists());
}

#[test]
fn test_empty_features_table_fails() {
    let project = Project::seeded();
    fs::write(
        project.path().join("project_context/features.md"),
        "# Features\n| Feature Name | User Story |\n|---|---|\n|  |  |\n",
    )
    .unwrap();

    project
        .srsgen(&["features"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No populated features found"));
    assert!(!project.path().join("output/SRS_Draft.md").exists());
}

#[test]
fn test_json_output() {
    let project = Project::seeded();
    project.srsgen(&["all"]).assert().success();

    let output = project
        .srsgen(&["--format", "json", "audit"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"], "Audit_Report.md");
    assert!(value["requirements"].as_u64().unwrap() > 0);
    assert_eq!(value["verdicts"].as_array().unwrap().len(), 8);
}

#[test]
fn test_json_errors() {
    let project = Project::empty();
    project
        .srsgen(&["--format", "json", "logic"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"code\": \"E002\""));
}

#[test]
fn test_quiet_suppresses_status_line() {
    let project = Project::seeded();
    project
        .srsgen(&["-q", "describe"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_root_flag_and_config_file() {
    let project = Project::empty();
    let root = project.path().join("workspace");
    fs::create_dir_all(root.join(".srsgen")).unwrap();
    fs::write(
        root.join(".srsgen/config.yaml"),
        "project:\n  name: ${SRSGEN_TEST_NAME:-Lecturely}\npaths:\n  srs_file: build/SRS.md\n  output_dir: build\n",
    )
    .unwrap();

    let root_arg = root.to_str().unwrap();
    project.srsgen(&["--root", root_arg, "init"]).assert().success();
    project
        .srsgen(&["--root", root_arg, "introduction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated build/SRS.md"));

    let srs = fs::read_to_string(root.join("build/SRS.md")).unwrap();
    assert!(srs.contains("Lecturely"));
}

#[test]
fn test_missing_explicit_config_fails() {
    Project::empty()
        .srsgen(&["--config", "nope.yaml", "introduction"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}
