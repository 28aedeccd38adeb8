//! Global constants used throughout the mkpkg codebase.
//!
//! This module contains the registry endpoint URLs, network timeouts, and
//! other constants that are used across multiple modules. Defining them
//! centrally improves maintainability and makes magic numbers more
//! discoverable.

use std::time::Duration;

/// Base URL of the primary metadata source (fast-npm-meta).
///
/// Accepts a `+`-joined, percent-encoded list of package names in the path
/// and returns either a single `{name, version}` object (one name) or an
/// array of such objects (multiple names).
pub const PRIMARY_REGISTRY_URL: &str = "https://npm.antfu.dev";

/// Base URL of the secondary metadata source (the npm registry).
///
/// Used one package at a time via `/{name}/latest` after a failed batch
/// lookup against the primary source.
pub const FALLBACK_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Total timeout for a single metadata request (10 seconds).
///
/// Version lookups are small JSON responses; anything slower than this is
/// treated as an ordinary lookup failure rather than left to hang.
pub const REGISTRY_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for establishing a connection to a registry (5 seconds).
pub const REGISTRY_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// User agent sent with every registry request.
pub const USER_AGENT: &str = concat!("mkpkg/", env!("CARGO_PKG_VERSION"));

/// Version placeholder written into the manifest for names that could not
/// be resolved. The scaffolder seeds every requested dev dependency with
/// this value and overwrites it with a `^X.Y.Z` range on success.
pub const UNRESOLVED_VERSION: &str = "latest";

/// Virtual package name resolved alongside the dev dependencies to pin the
/// `packageManager` manifest field. Never written to `devDependencies`.
pub const PACKAGE_MANAGER_NAME: &str = "npm";

/// Initial version written into every generated manifest.
pub const INITIAL_VERSION: &str = "0.1.0";
