//! Global config integration: defaults flow into the generated manifest.

use tempfile::TempDir;

use crate::common::{mkpkg, read_package};

#[test]
fn test_config_defaults_flow_into_manifest() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "author = \"hyrious <hyrious@outlook.com>\"\nscope = \"hyrious\"\nlicense = \"ISC\"\n",
    )
    .unwrap();
    let dir = temp.path().join("lib");

    mkpkg(temp.path()).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["name"], "@hyrious/lib");
    assert_eq!(package["author"], "hyrious <hyrious@outlook.com>");
    assert_eq!(package["license"], "ISC");
}

#[test]
fn test_scope_flag_overrides_config_scope() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "scope = \"hyrious\"\n").unwrap();
    let dir = temp.path().join("lib");

    mkpkg(temp.path()).args(["--scope", "acme"]).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["name"], "@acme/lib");
}

#[test]
fn test_missing_config_uses_builtin_defaults() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("plain");

    mkpkg(temp.path()).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["name"], "plain");
    assert_eq!(package["license"], "MIT");
    assert!(package.get("author").is_none());
}
