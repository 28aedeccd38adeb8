//! End-to-end scaffolding runs against a temp directory.

use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{mkpkg, read_package};

#[test]
fn test_default_scaffold_is_esm_only() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("demo");

    mkpkg(temp.path()).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["name"], "demo");
    assert_eq!(package["version"], "0.1.0");
    assert_eq!(package["description"], "demo");
    assert_eq!(package["license"], "MIT");
    assert_eq!(package["type"], "module");
    assert_eq!(package["exports"], "./index.js");
    assert!(package.get("devDependencies").is_none());
    assert!(package.get("packageManager").is_none());

    assert!(dir.join("index.js").exists());
    assert!(!dir.join("tsconfig.json").exists());
    assert!(!dir.join(".vscode").exists());

    let gitignore = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
    assert!(gitignore.contains("node_modules"));
    assert!(gitignore.contains("dist"));
}

#[test]
fn test_typescript_scaffold() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("ts-demo");

    mkpkg(temp.path()).arg("--typescript").arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(
        package["scripts"]["build"],
        "tsup src/index.ts --clean --treeshake --target esnext --dts"
    );
    assert_eq!(package["devDependencies"]["typescript"], "latest");
    assert_eq!(package["devDependencies"]["tsup"], "latest");

    assert!(dir.join("src/index.ts").exists());
    assert!(dir.join("tsconfig.json").exists());
    assert!(!dir.join("index.js").exists());

    let tsconfig: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("tsconfig.json")).unwrap()).unwrap();
    assert_eq!(tsconfig["include"][0], "src");
    assert_eq!(tsconfig["compilerOptions"]["strict"], true);
}

#[test]
fn test_dual_scaffold_changes_layout_and_build() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("dual-demo");

    mkpkg(temp.path()).args(["--typescript", "--dual"]).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert!(package.get("type").is_none());
    assert_eq!(package["main"], "dist/index.js");
    assert_eq!(package["module"], "dist/index.mjs");
    assert_eq!(package["types"], "dist/index.d.ts");
    assert_eq!(
        package["scripts"]["build"],
        "tsup src/index.ts --format esm,cjs --clean --treeshake --target esnext --dts"
    );
}

#[test]
fn test_prettier_scaffold_configures_editor() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pretty");

    mkpkg(temp.path()).arg("--prettier").arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["scripts"]["format"], "prettier -w .");
    assert_eq!(package["devDependencies"]["prettier"], "latest");

    let settings: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join(".vscode/settings.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(settings["editor.formatOnSave"], true);
    assert_eq!(settings["editor.defaultFormatter"], "esbenp.prettier-vscode");

    assert!(!dir.join(".eslintrc").exists());
}

#[test]
fn test_eslint_scaffold_writes_eslintrc() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("linted");

    mkpkg(temp.path()).arg("--eslint").arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["scripts"]["lint"], "eslint .");
    assert_eq!(package["devDependencies"]["eslint"], "latest");
    assert_eq!(package["devDependencies"]["@antfu/eslint-config"], "latest");

    let eslintrc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(".eslintrc")).unwrap()).unwrap();
    assert_eq!(eslintrc["extends"], "@antfu");

    let settings: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join(".vscode/settings.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(settings["eslint.enable"], true);
}

#[test]
fn test_scoped_name_from_flag() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("scoped");

    mkpkg(temp.path()).args(["--scope", "hyrious"]).arg(&dir).assert().success();

    let package = read_package(&dir);
    assert_eq!(package["name"], "@hyrious/scoped");
    // description stays unscoped
    assert_eq!(package["description"], "scoped");
}

#[test]
fn test_dotfiles_do_not_block_scaffolding() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("repo");
    std::fs::create_dir_all(dir.join(".git")).unwrap();
    std::fs::write(dir.join(".gitignore"), "node_modules\n*.log\n").unwrap();

    mkpkg(temp.path()).arg(&dir).assert().success();

    // existing entries survive and are not duplicated
    let gitignore = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
    assert_eq!(gitignore.matches("node_modules").count(), 1);
    assert!(gitignore.contains("*.log"));
    assert!(gitignore.contains("dist"));
}

#[test]
fn test_offline_keeps_placeholders_and_prints_next_steps() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("placeholders");

    mkpkg(temp.path())
        .arg("--prettier")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps:"));

    // offline keeps the placeholder without failing the scaffold
    let package = read_package(&dir);
    assert_eq!(package["devDependencies"]["prettier"], "latest");
}

#[test]
fn test_quiet_suppresses_stdout() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("silent");

    mkpkg(temp.path())
        .arg("--quiet")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.join("package.json").exists());
}
