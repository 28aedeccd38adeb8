//! Global configuration for mkpkg.
//!
//! mkpkg reads per-user defaults from `~/.mkpkg/config.toml` (or the path in
//! the `MKPKG_CONFIG` environment variable):
//!
//! ```toml
//! author = "hyrious <hyrious@outlook.com>"
//! scope = "hyrious"
//! license = "MIT"
//! ```
//!
//! Every field is optional. Command-line flags override config values; the
//! config fills in when flags are absent. A missing file yields defaults; a
//! malformed file is a hard error so typos do not silently produce packages
//! with the wrong metadata.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Per-user scaffolding defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Author string written into generated manifests (`Name <email>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Default npm scope for package names (with or without the leading `@`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Default SPDX license identifier. Falls back to `MIT` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl GlobalConfig {
    /// Load the configuration from the default location.
    ///
    /// Resolution order: `MKPKG_CONFIG` environment variable, then
    /// `~/.mkpkg/config.toml`. A missing file returns [`Self::default`].
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file path.
    ///
    /// Primarily used by tests and by callers that manage their own config
    /// location.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// The default configuration file path.
    ///
    /// Honors the `MKPKG_CONFIG` environment variable, otherwise
    /// `~/.mkpkg/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("MKPKG_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        Ok(dirs::home_dir()
            .context("Unable to determine home directory")?
            .join(".mkpkg")
            .join("config.toml"))
    }

    /// The effective license identifier.
    pub fn license_or_default(&self) -> String {
        self.license.clone().unwrap_or_else(|| "MIT".to_string())
    }
}
