//! Integration tests for sdkpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn sdkpack_cmd() -> Command {
    cargo_bin_cmd!("sdkpack")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_sdk(root: &Path) {
    write(root, "lib/a.dart", "library a;");
    write(root, "lib/.dart_tool/cache.bin", "cache");
    write(root, "pubspec.yaml", "name: sdk");
    write(root, "README.md", "# SDK");
}

fn archives_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "zip"))
        .collect()
}

fn entry_names(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    sdkpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdkpack"));
}

#[test]
fn test_help_flag() {
    sdkpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--exclude"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn test_pack_prints_stages_and_path() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    let output = temp.path().join("output");
    sample_sdk(&root);

    sdkpack_cmd()
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copying files..."))
        .stdout(predicate::str::contains("Creating ZIP archive..."))
        .stdout(predicate::str::contains("Cleaning up temporary files..."))
        .stdout(predicate::str::contains("SDK package saved to:"))
        .stdout(predicate::str::contains("wukongimfluttersdk_"));

    let archives = archives_in(&output);
    assert_eq!(archives.len(), 1);
    assert!(!output.join("temp").exists());
    assert_eq!(
        entry_names(&archives[0]),
        vec!["README.md", "lib/a.dart", "pubspec.yaml"]
    );
}

#[test]
fn test_missing_include_warns_by_name() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    sample_sdk(&root);

    sdkpack_cmd()
        .arg("-s")
        .arg(&root)
        .arg("-o")
        .arg(temp.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::contains("LICENSE does not exist, skipped"))
        .stdout(predicate::str::contains("CHANGELOG.md does not exist, skipped"));
}

#[test]
fn test_runs_with_no_arguments_from_sdk_root() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_sdk(temp.path());

    sdkpack_cmd().current_dir(temp.path()).assert().success();

    let output = temp.path().join("output");
    assert_eq!(archives_in(&output).len(), 1);
    assert!(!output.join("temp").exists());
}

#[test]
fn test_custom_prefix_include_and_exclude() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    let output = temp.path().join("output");
    sample_sdk(&root);
    write(&root, "lib/gen/api.g.dart", "// generated");

    sdkpack_cmd()
        .args(["--prefix", "acme", "-i", "lib/", "-x", "*.g.dart"])
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success();

    let archives = archives_in(&output);
    assert_eq!(archives.len(), 1);
    let name = archives[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("acme_"));
    assert_eq!(entry_names(&archives[0]), vec!["lib/a.dart"]);
}

#[test]
fn test_json_output_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    sample_sdk(&root);

    let stdout = sdkpack_cmd()
        .arg("--json")
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&stdout).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["data"]["files_archived"], 3);
    assert_eq!(json["data"]["directories_staged"], 1);
    assert!(
        json["data"]["missing_includes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "LICENSE")
    );
    assert!(
        Path::new(json["data"]["archive_path"].as_str().unwrap()).is_file(),
        "archive path should point at the produced file"
    );
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    sample_sdk(&root);

    sdkpack_cmd()
        .arg("--quiet")
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_prints_statistics_and_warning_recap() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    sample_sdk(&root);

    sdkpack_cmd()
        .arg("--verbose")
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Files archived:   3"))
        .stdout(predicate::str::contains("Directories:      1"))
        .stdout(predicate::str::contains("Paths excluded:   1"))
        .stdout(predicate::str::contains("Warnings:"))
        .stdout(predicate::str::contains("  - LICENSE does not exist, skipped"));
}

#[test]
fn test_failure_reported_once() {
    let temp = TempDir::new().expect("failed to create temp dir");

    sdkpack_cmd()
        .env_remove("RUST_LOG")
        .arg("--source")
        .arg(temp.path().join("nope"))
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR:").count(1))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_source_fails_with_hint() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let output = temp.path().join("output");

    sdkpack_cmd()
        .arg("--source")
        .arg(temp.path().join("nope"))
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Source root not found"))
        .stdout(predicate::str::contains("HINT"));

    assert!(!output.join("temp").exists());
}

#[test]
fn test_invalid_exclude_pattern_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("sdk");
    sample_sdk(&root);

    sdkpack_cmd()
        .args(["--exclude", "[unclosed"])
        .arg("--source")
        .arg(&root)
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid exclude pattern"));
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let stdout = sdkpack_cmd()
        .arg("--json")
        .arg("--source")
        .arg(temp.path().join("nope"))
        .arg("--output-dir")
        .arg(temp.path().join("output"))
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&stdout).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("Source root not found"));
}

#[test]
fn test_invalid_compression_level_rejected() {
    sdkpack_cmd()
        .args(["--compression-level", "12"])
        .assert()
        .failure();
}
