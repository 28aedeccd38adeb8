//! Integration test suite for mkpkg.
//!
//! These tests drive the compiled binary end to end with `assert_cmd`.
//! Every run uses `--offline` (registry lookups are covered by the resolver
//! unit tests with a mock transport) and points `MKPKG_CONFIG` at a path
//! inside the test's temp directory so a developer's real config never
//! leaks in.
//!
//! # Running
//!
//! ```bash
//! cargo test --test integration
//! ```

mod common;

mod config;
mod errors;
mod scaffold;
