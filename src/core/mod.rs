//! Core types and error handling for mkpkg.
//!
//! The error system has two levels:
//! - [`MkpkgError`] - strongly typed failure cases for precise handling in code
//! - [`ErrorContext`] - a wrapper that adds user-facing suggestions and details
//!
//! Library code returns `anyhow::Result` and attaches context with
//! `.context(...)`; the CLI entry point converts whatever bubbles up into an
//! [`ErrorContext`] via [`user_friendly_error`] before displaying it.
//!
//! Registry lookup failures never reach this layer: the version resolver
//! encodes them as absent keys in its output mapping (see
//! [`crate::resolver`]).

pub mod error;

pub use error::{ErrorContext, MkpkgError, user_friendly_error};
