//! mkpkg - scaffold a new npm package.
//!
//! mkpkg turns an empty directory into a ready-to-develop npm package:
//! it derives the package name from the directory, writes `package.json`
//! and the boilerplate files for the selected features (Prettier, eslint,
//! TypeScript, dual ESM/CJS output), and resolves the latest versions of
//! the chosen dev dependencies from the npm registry.
//!
//! # Version resolution
//!
//! Dependency versions come from a best-effort, two-tier lookup implemented
//! in [`resolver`]: one batch request against a fast metadata service, with
//! a concurrent per-name fallback against the npm registry when the batch
//! fails. Names that cannot be resolved stay on the `latest` placeholder and
//! are reported as a warning; scaffolding never fails because the registry
//! was unreachable.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (clap)
//! - [`scaffold`] - Directory validation, manifest assembly, file templates
//! - [`resolver`] - Batch-then-fallback latest-version resolution
//! - [`manifest`] - The generated `package.json` model
//! - [`config`] - Per-user defaults (`~/.mkpkg/config.toml`)
//! - [`core`] - Error types and user-facing error display
//!
//! # Example
//!
//! ```bash
//! mkdir my-lib && cd my-lib
//! mkpkg --typescript --prettier
//! npm install
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod manifest;
pub mod resolver;
pub mod scaffold;
