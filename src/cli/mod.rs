//! Command-line interface for mkpkg.
//!
//! mkpkg is a single-purpose tool, so there are no subcommands: the root
//! command scaffolds a new npm package into the target directory.
//!
//! # Usage
//!
//! ```bash
//! # Scaffold into the current (empty) directory
//! mkpkg
//!
//! # Scaffold a TypeScript package that also ships CJS
//! mkpkg --typescript --dual
//!
//! # Scaffold into a new directory with Prettier set up
//! mkpkg --prettier ./my-lib
//!
//! # Skip registry lookups (devDependencies stay on "latest")
//! mkpkg --typescript --offline
//! ```
//!
//! `--verbose` and `--quiet` control log output (`RUST_LOG` overrides both);
//! `--no-progress` disables the resolution spinner for scripts and CI.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::scaffold::{ScaffoldOptions, Scaffolder};

/// Scaffold a new npm package in an empty directory.
#[derive(Parser, Debug)]
#[command(
    name = "mkpkg",
    about = "Create a new npm package with freshly resolved dev dependencies",
    version,
    long_about = "mkpkg validates that the target directory is empty, derives the package \
                  name from the directory, writes package.json and the boilerplate files \
                  for the selected features, and resolves the latest versions of the dev \
                  dependencies from the npm registry (best effort)."
)]
pub struct Cli {
    /// Directory to scaffold into (created if missing; defaults to the
    /// current directory, which must be empty apart from dot-entries).
    pub path: Option<PathBuf>,

    /// Set up Prettier (`format` script, editor format-on-save).
    ///
    /// Mutually exclusive with `--eslint`: `@antfu/eslint-config` already
    /// handles formatting.
    #[arg(long)]
    pub prettier: bool,

    /// Set up eslint with `@antfu/eslint-config` (`lint` script, editor
    /// fix-on-save).
    #[arg(long)]
    pub eslint: bool,

    /// Set up TypeScript with tsup (`build` script, `src/index.ts`,
    /// `tsconfig.json`).
    #[arg(long)]
    pub typescript: bool,

    /// Emit both ESM and CJS builds instead of an ESM-only package.
    /// Requires `--typescript`.
    #[arg(long)]
    pub dual: bool,

    /// npm scope for the package name (e.g. `--scope hyrious` scaffolds
    /// `@hyrious/<dirname>`). Overrides the configured default scope.
    #[arg(long)]
    pub scope: Option<String>,

    /// Skip registry lookups; leave devDependencies on the "latest"
    /// placeholder.
    #[arg(long)]
    pub offline: bool,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors and warnings.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the progress spinner (useful for scripts and CI).
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Default tracing filter implied by the verbosity flags.
    ///
    /// An explicit `RUST_LOG` takes precedence over this (see `main`).
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "mkpkg=debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Execute the scaffold described by the parsed arguments.
    pub async fn execute(self) -> Result<()> {
        let config = GlobalConfig::load().await?;

        let options = ScaffoldOptions {
            path: self.path,
            prettier: self.prettier,
            eslint: self.eslint,
            typescript: self.typescript,
            dual: self.dual,
            scope: self.scope,
            offline: self.offline,
            no_progress: self.no_progress,
            quiet: self.quiet,
        };

        Scaffolder::new(options, config).execute().await
    }
}
