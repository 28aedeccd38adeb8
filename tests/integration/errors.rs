//! Error scenarios: flag conflicts, populated directories, bad config.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::mkpkg;

#[test]
fn test_populated_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("busy");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("README.md"), "# existing project\n").unwrap();

    mkpkg(temp.path())
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not empty"));

    assert!(!dir.join("package.json").exists());
}

#[test]
fn test_prettier_and_eslint_conflict() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("conflicted");

    mkpkg(temp.path())
        .args(["--prettier", "--eslint"])
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--prettier and --eslint"));

    // validation happens before any write
    assert!(!dir.exists());
}

#[test]
fn test_dual_requires_typescript() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("half-dual");

    mkpkg(temp.path())
        .arg("--dual")
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dual requires --typescript"));
}

#[test]
fn test_verbose_and_quiet_conflict_at_parse_time() {
    let temp = TempDir::new().unwrap();

    mkpkg(temp.path())
        .args(["--verbose", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_malformed_config_is_a_hard_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "author = [broken\n").unwrap();
    let dir = temp.path().join("orphan");

    mkpkg(temp.path())
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));

    assert!(!dir.join("package.json").exists());
}
