//! Shared helpers for the integration suite.

use assert_cmd::Command;
use std::path::Path;

/// Build an `mkpkg` command isolated from the developer's environment:
/// config is read from `<sandbox>/config.toml` (usually absent) and all
/// runs are offline with the spinner disabled.
pub fn mkpkg(sandbox: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mkpkg").unwrap();
    cmd.env("MKPKG_CONFIG", sandbox.join("config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd.args(["--offline", "--no-progress"]);
    cmd
}

/// Read and parse the generated package.json.
pub fn read_package(dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.join("package.json"))
        .expect("package.json should have been written");
    serde_json::from_str(&content).expect("package.json should be valid JSON")
}
