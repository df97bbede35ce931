//! Golden tests for repodump
//!
//! These tests run the binary against `tests/fixtures/sample_project` and
//! compare the produced document with the checked-in expectation.
//! Golden tests ensure:
//! - Document format stability across versions
//! - Stable ordering of listings and content blocks
//! - Default pattern behavior does not drift

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_project")
}

/// Create a command for running the repodump binary
fn repodump_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("repodump"))
}

/// Copy the sample project into a scratch directory so full mode can
/// write its report without touching the checked-in fixture
fn scratch_copy() -> TempDir {
    let temp = tempdir().unwrap();
    let src = sample_project();

    for entry in WalkDir::new(&src).min_depth(1) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(&src).unwrap();
        let dest = temp.path().join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).unwrap();
        } else {
            fs::copy(entry.path(), &dest).unwrap();
        }
    }

    temp
}

/// Remove the run-dependent front matter lines (timestamp, absolute root)
fn normalize(document: &str) -> String {
    document
        .lines()
        .filter(|l| !l.starts_with("scan_timestamp: ") && !l.starts_with("root_path: "))
        .map(|l| format!("{}\n", l))
        .collect()
}

fn expected(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

fn run_full(root: &Path, extra: &[&str]) -> String {
    repodump_cmd()
        .arg(root)
        .args(extra)
        .arg("-q")
        .assert()
        .success();
    fs::read_to_string(root.join("repo_dump.md")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Full Mode ====================

    #[test]
    fn golden_full_with_defaults() {
        let temp = scratch_copy();
        let document = run_full(temp.path(), &["-d"]);

        assert_eq!(normalize(&document), expected("sample_project.full.md"));
    }

    #[test]
    fn golden_full_is_stable_across_reruns() {
        let temp = scratch_copy();
        let first = run_full(temp.path(), &["-d"]);
        let second = run_full(temp.path(), &["-d"]);

        assert_eq!(normalize(&first), normalize(&second));
    }

    #[test]
    fn golden_front_matter_shape() {
        let temp = scratch_copy();
        let document = run_full(temp.path(), &["-d", "-e", "docs/", "-s", "*.md", "!README.md"]);

        let header: Vec<&str> = document.lines().take(7).collect();
        assert_eq!(header[0], "---");
        assert!(header[1].starts_with("scan_timestamp: \""));
        assert!(header[1].ends_with("+00:00\""));
        assert!(header[2].starts_with("root_path: \""));
        assert_eq!(header[3], "default_patterns_enabled: true");
        assert_eq!(header[4], "custom_exclude_structure_patterns: [\"docs/\"]");
        assert_eq!(
            header[5],
            "custom_exclude_editable_patterns: [\"*.md\",\"!README.md\"]"
        );
        assert_eq!(header[6], "---");

        assert!(!document.contains("docs/guide.md"));
        assert!(document.contains("## FILE: `README.md`"));
    }

    // ==================== Initial List ====================

    #[test]
    fn golden_initial_list() {
        let output = repodump_cmd()
            .arg(sample_project())
            .arg("--initial-list")
            .arg("-q")
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(normalize(&stdout), expected("sample_project.initial.md"));
        assert!(!sample_project().join("repo_dump.md").exists());
    }
}
