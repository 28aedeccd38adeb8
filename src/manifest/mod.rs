//! The generated `package.json` manifest model.
//!
//! This struct encapsulates everything mkpkg writes into a new package's
//! manifest. Serialization behavior is the point of this module:
//!
//! - Field declaration order fixes the key order npm users expect
//!   (`name`, `version`, `description`, ... `scripts`, `devDependencies`),
//!   so the output never needs a post-hoc sorting pass.
//! - `scripts` and `devDependencies` are [`BTreeMap`]s, so their entries
//!   serialize alphabetically.
//! - Optional fields are omitted entirely when unset; `keywords` is always
//!   present (npm templates ship it empty as a prompt to fill in).
//!
//! The same struct round-trips through serde, which the tests use to verify
//! the rendered output.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::INITIAL_VERSION;

/// A `package.json` file about to be written to disk.
///
/// Field order here is load-bearing: `serde_json` serializes struct fields
/// in declaration order, which yields the conventional npm manifest layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name, possibly scoped (`@scope/name`).
    pub name: String,

    /// Initial semantic version.
    pub version: String,

    /// One-line description; defaults to the directory basename.
    pub description: String,

    /// Search keywords. Serialized even when empty.
    pub keywords: Vec<String>,

    /// SPDX license identifier.
    pub license: String,

    /// Author string (`Name <email>`), omitted when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Pinned package manager specifier (`npm@X.Y.Z`), set when the
    /// scaffolder resolved the virtual package-manager entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,

    /// Module system marker (`"module"` for ESM-only packages). Absent in
    /// dual-format packages, which rely on `main`/`module` instead.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,

    /// CommonJS entry point (dual-format packages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// ESM entry point (dual-format packages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Type declarations entry point (dual-format packages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,

    /// Export map or entry file (ESM-only packages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<String>,

    /// npm scripts, sorted by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub scripts: BTreeMap<String, String>,

    /// Development dependencies, sorted by name. Values are either resolved
    /// `^X.Y.Z` ranges or the `latest` placeholder for names the resolver
    /// could not look up.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Create a manifest with the standard initial values and no optional
    /// fields set.
    pub fn new(name: impl Into<String>, description: impl Into<String>, license: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: INITIAL_VERSION.to_string(),
            description: description.into(),
            keywords: Vec::new(),
            license: license.into(),
            author: None,
            package_manager: None,
            module_type: None,
            main: None,
            module: None,
            types: None,
            exports: None,
            scripts: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
        }
    }

    /// Configure the ESM-only layout (`type: "module"`, single export).
    pub fn esm_layout(&mut self, entry: &str) {
        self.module_type = Some("module".to_string());
        self.exports = Some(entry.to_string());
    }

    /// Configure the dual CJS/ESM layout produced by a bundler.
    pub fn dual_layout(&mut self) {
        self.main = Some("dist/index.js".to_string());
        self.module = Some("dist/index.mjs".to_string());
        self.types = Some("dist/index.d.ts".to_string());
    }

    /// Render the manifest as pretty-printed JSON with a trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self).context("Failed to serialize package.json")?;
        out.push('\n');
        Ok(out)
    }
}
