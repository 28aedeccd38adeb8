//! Scaffold a new npm package into an empty directory.
//!
//! This module is the glue between the CLI and the version resolver: it
//! validates the target directory, derives the package name, assembles the
//! manifest for the selected feature flags, resolves latest versions for the
//! dev dependencies (best effort), and writes the boilerplate files.
//!
//! # Generated layout
//!
//! Always: `package.json`, `.gitignore` (appended, never duplicated).
//!
//! With `--typescript`: `src/index.ts` and `tsconfig.json`; otherwise a bare
//! `index.js`. With `--prettier` or `--eslint`: `.vscode/settings.json`
//! enabling the matching editor integration, plus `.eslintrc` for eslint.
//!
//! # Version resolution
//!
//! Every requested dev dependency is seeded with the `latest` placeholder,
//! then overwritten with the resolver's `^X.Y.Z` range where resolution
//! succeeded. Names still carrying the placeholder afterwards are listed in
//! a warning; scaffolding itself never fails because the registry was
//! unavailable. The virtual `npm` entry rides along in the same batch and,
//! when resolved, pins the manifest's `packageManager` field instead of
//! landing in `devDependencies`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use serde_json::json;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::constants::{PACKAGE_MANAGER_NAME, UNRESOLVED_VERSION};
use crate::core::MkpkgError;
use crate::manifest::PackageManifest;
use crate::resolver::VersionResolver;

/// What to scaffold, assembled from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Target directory; defaults to the current directory.
    pub path: Option<PathBuf>,
    /// Set up Prettier formatting.
    pub prettier: bool,
    /// Set up eslint with `@antfu/eslint-config`.
    pub eslint: bool,
    /// Set up TypeScript with tsup.
    pub typescript: bool,
    /// Emit both ESM and CJS (requires TypeScript).
    pub dual: bool,
    /// npm scope for the package name, with or without the leading `@`.
    pub scope: Option<String>,
    /// Skip version resolution entirely; keep `latest` placeholders.
    pub offline: bool,
    /// Suppress the resolution spinner.
    pub no_progress: bool,
    /// Suppress non-warning output.
    pub quiet: bool,
}

impl ScaffoldOptions {
    /// Reject unsupported flag combinations before touching the filesystem.
    pub fn validate(&self) -> Result<(), MkpkgError> {
        if self.prettier && self.eslint {
            return Err(MkpkgError::OptionConflict {
                message: "--prettier and --eslint cannot be combined".to_string(),
            });
        }
        if self.dual && !self.typescript {
            return Err(MkpkgError::OptionConflict {
                message: "--dual requires --typescript".to_string(),
            });
        }
        Ok(())
    }
}

/// Executes one scaffolding run.
pub struct Scaffolder {
    options: ScaffoldOptions,
    config: GlobalConfig,
}

impl Scaffolder {
    /// Create a scaffolder from validated options and user defaults.
    pub fn new(options: ScaffoldOptions, config: GlobalConfig) -> Self {
        Self { options, config }
    }

    /// Run the scaffold: validate, assemble, resolve, write, report.
    pub async fn execute(self) -> Result<()> {
        self.options.validate()?;

        let target_dir = self.options.path.clone().unwrap_or_else(|| PathBuf::from("."));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .with_context(|| format!("Failed to create directory {}", target_dir.display()))?;
        }
        ensure_empty(&target_dir)?;

        let scope = self.options.scope.as_deref().or(self.config.scope.as_deref());
        let (name, basename) = package_name(&target_dir, scope)?;

        let mut manifest =
            PackageManifest::new(name.as_str(), basename.as_str(), self.config.license_or_default());
        manifest.author = self.config.author.clone();

        if self.options.dual {
            manifest.dual_layout();
        } else {
            manifest.esm_layout("./index.js");
        }

        for dep in self.dev_dependency_names() {
            manifest
                .dev_dependencies
                .insert(dep, UNRESOLVED_VERSION.to_string());
        }
        self.add_scripts(&mut manifest);

        if !self.options.offline {
            let resolved = self.resolve_versions(&manifest).await?;
            apply_resolved(&mut manifest, resolved);
        }

        self.write_files(&target_dir, &manifest)?;
        self.report(&target_dir, &manifest);

        Ok(())
    }

    /// Dev dependency names implied by the feature flags.
    fn dev_dependency_names(&self) -> Vec<String> {
        let mut deps = Vec::new();
        if self.options.prettier {
            deps.push("prettier".to_string());
        }
        if self.options.eslint {
            deps.push("eslint".to_string());
            deps.push("@antfu/eslint-config".to_string());
        }
        if self.options.typescript {
            deps.push("typescript".to_string());
            deps.push("tsup".to_string());
        }
        deps
    }

    fn add_scripts(&self, manifest: &mut PackageManifest) {
        if self.options.prettier {
            manifest
                .scripts
                .insert("format".to_string(), "prettier -w .".to_string());
        }
        if self.options.eslint {
            manifest.scripts.insert("lint".to_string(), "eslint .".to_string());
        }
        if self.options.typescript {
            let formats = if self.options.dual { " --format esm,cjs" } else { "" };
            manifest.scripts.insert(
                "build".to_string(),
                format!("tsup src/index.ts{formats} --clean --treeshake --target esnext --dts"),
            );
        }
    }

    /// Resolve latest versions for the seeded dev dependencies plus the
    /// virtual package-manager entry, behind a spinner when appropriate.
    async fn resolve_versions(&self, manifest: &PackageManifest) -> Result<BTreeMap<String, String>> {
        let mut requested: BTreeSet<String> = manifest.dev_dependencies.keys().cloned().collect();
        requested.insert(PACKAGE_MANAGER_NAME.to_string());

        let spinner = if self.options.no_progress || self.options.quiet {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_message("Resolving latest versions...");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };

        let resolver = VersionResolver::new()?;
        let resolved = resolver.resolve(&requested).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        Ok(resolved)
    }

    fn write_files(&self, dir: &Path, manifest: &PackageManifest) -> Result<()> {
        write_file(&dir.join("package.json"), &manifest.render()?)?;

        if self.options.prettier || self.options.eslint {
            let vscode_dir = dir.join(".vscode");
            fs::create_dir_all(&vscode_dir)
                .with_context(|| format!("Failed to create directory {}", vscode_dir.display()))?;
            write_file(
                &vscode_dir.join("settings.json"),
                &render_json(&vscode_settings(self.options.prettier))?,
            )?;
        }

        if self.options.eslint {
            write_file(&dir.join(".eslintrc"), &render_json(&json!({ "extends": "@antfu" }))?)?;
        }

        if self.options.typescript {
            let src_dir = dir.join("src");
            fs::create_dir_all(&src_dir)
                .with_context(|| format!("Failed to create directory {}", src_dir.display()))?;
            write_file(&src_dir.join("index.ts"), "export function hello() {}\n")?;
            write_file(&dir.join("tsconfig.json"), &render_json(&tsconfig())?)?;
        } else {
            write_file(&dir.join("index.js"), "export function hello() {}\n")?;
        }

        append_gitignore(dir, &["node_modules", "dist"])?;

        Ok(())
    }

    /// Success summary, unresolved-name warning, and next steps.
    fn report(&self, dir: &Path, manifest: &PackageManifest) {
        if !self.options.quiet {
            println!(
                "{} Created {} at {}",
                "✓".green(),
                manifest.name,
                dir.join("package.json").display()
            );
        }

        let unresolved = unresolved_names(manifest);
        if !unresolved.is_empty() {
            eprintln!(
                "{} Could not resolve latest versions for: {}",
                "warning:".yellow().bold(),
                unresolved.join(", ")
            );
            eprintln!("  Their devDependencies entries are set to \"latest\"; pin them before publishing.");
        }

        if !self.options.quiet {
            println!("\n{}", "Next steps:".cyan());
            println!("  npm install");
            if self.options.typescript {
                println!("  npm run build");
            }
            if self.options.prettier {
                println!("  npm run format");
            }
            if self.options.eslint {
                println!("  npm run lint");
            }
        }
    }
}

/// Merge resolved version ranges into the manifest.
///
/// Requested names keep their placeholder unless the resolver produced a
/// range for them; names the resolver returned that were never requested are
/// ignored. The virtual package-manager entry is extracted into the
/// `packageManager` field (caret stripped) instead of `devDependencies`.
fn apply_resolved(manifest: &mut PackageManifest, resolved: BTreeMap<String, String>) {
    for (name, range) in resolved {
        if name == PACKAGE_MANAGER_NAME {
            let version = range.trim_start_matches('^');
            manifest.package_manager = Some(format!("{PACKAGE_MANAGER_NAME}@{version}"));
        } else if let Some(slot) = manifest.dev_dependencies.get_mut(&name) {
            *slot = range;
        } else {
            debug!("ignoring unrequested resolution for '{name}'");
        }
    }
}

/// Dev dependencies still carrying the `latest` placeholder.
fn unresolved_names(manifest: &PackageManifest) -> Vec<String> {
    manifest
        .dev_dependencies
        .iter()
        .filter(|(_, version)| version.as_str() == UNRESOLVED_VERSION)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Fail unless `dir` contains nothing but dot-entries (`.git` and friends).
fn ensure_empty(dir: &Path) -> Result<()> {
    let mut blocking = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'));

    if blocking.next().is_some() {
        return Err(MkpkgError::TargetDirNotEmpty {
            path: dir.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Derive `(package name, directory basename)` from the target directory.
///
/// The basename becomes the description; the name is `@scope/basename` when
/// a scope is configured, otherwise the bare basename.
fn package_name(dir: &Path, scope: Option<&str>) -> Result<(String, String)> {
    let canonical = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", dir.display()))?;

    let basename = canonical
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| MkpkgError::InvalidProjectName {
            path: dir.display().to_string(),
        })?
        .to_string();

    let name = match scope {
        Some(scope) => format!("@{}/{}", scope.trim_start_matches('@'), basename),
        None => basename.clone(),
    };

    Ok((name, basename))
}

/// `.vscode/settings.json` content for the selected linter/formatter.
fn vscode_settings(prettier: bool) -> serde_json::Value {
    if prettier {
        json!({
            "editor.formatOnSave": true,
            "editor.defaultFormatter": "esbenp.prettier-vscode",
            "prettier.enable": true
        })
    } else {
        json!({
            "editor.codeActionsOnSave": {
                "source.fixAll.eslint": true
            },
            "eslint.enable": true,
            "eslint.validate": [
                "javascript",
                "typescript",
                "javascriptreact",
                "typescriptreact",
                "vue",
                "html",
                "markdown",
                "json",
                "jsonc",
                "json5"
            ]
        })
    }
}

fn tsconfig() -> serde_json::Value {
    json!({
        "include": ["src"],
        "compilerOptions": {
            "noEmit": true,
            "target": "esnext",
            "module": "esnext",
            "lib": ["esnext"],
            "moduleResolution": "node",
            "esModuleInterop": true,
            "strict": true,
            "resolveJsonModule": true,
            "skipLibCheck": true,
            "stripInternal": true
        }
    })
}

fn render_json(value: &serde_json::Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    out.push('\n');
    Ok(out)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Append entries to `.gitignore`, creating it if needed and skipping lines
/// that already exist.
fn append_gitignore(dir: &Path, entries: &[&str]) -> Result<()> {
    let path = dir.join(".gitignore");
    let mut content = if path.exists() {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let mut changed = false;
    for entry in entries {
        if !content.lines().any(|line| line.trim() == *entry) {
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(entry);
            content.push('\n');
            changed = true;
        }
    }

    if changed {
        write_file(&path, &content)?;
    }
    Ok(())
}
