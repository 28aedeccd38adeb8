//! Error handling for mkpkg.
//!
//! This module provides the error types and user-friendly error reporting for
//! the scaffolder. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`MkpkgError`] - Enumerated error types for all failure cases in mkpkg
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Common standard library and ecosystem errors are automatically converted:
//! - [`std::io::Error`] → [`MkpkgError::IoError`]
//! - [`serde_json::Error`] → [`MkpkgError::JsonError`]
//! - [`toml::de::Error`] → [`MkpkgError::TomlError`]
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly
//! format with contextual suggestions before display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mkpkg::core::{MkpkgError, user_friendly_error};
//!
//! fn scaffold() -> Result<(), MkpkgError> {
//!     Err(MkpkgError::TargetDirNotEmpty { path: ".".to_string() })
//! }
//!
//! if let Err(e) = scaffold() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for mkpkg operations.
///
/// Each variant represents a specific failure mode and carries the details
/// needed to explain it to the user (paths, option names, reasons). Network
/// lookup failures are deliberately absent: the version resolver treats
/// partial resolution as a normal outcome, not an error (see
/// [`crate::resolver`]).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MkpkgError {
    /// The target directory contains files and cannot be scaffolded into.
    ///
    /// Entries whose names start with `.` (e.g. `.git`) do not count as
    /// content; everything else does.
    #[error("Target directory is not empty: {path}")]
    TargetDirNotEmpty {
        /// The directory that was expected to be empty
        path: String,
    },

    /// Two command-line options were combined in an unsupported way.
    #[error("Conflicting options: {message}")]
    OptionConflict {
        /// Description of the conflicting combination
        message: String,
    },

    /// A package name could not be derived from the target directory.
    #[error("Cannot derive a package name from directory: {path}")]
    InvalidProjectName {
        /// The directory whose basename was unusable
        path: String,
    },

    /// Global configuration file exists but could not be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A file or directory operation failed.
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "create directory", "write file")
        operation: String,
        /// The path involved in the failed operation
        path: String,
    },

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Generic error with a custom message
    #[error("{message}")]
    Other {
        /// The custom error message
        message: String,
    },
}

/// Error wrapper that carries user-facing suggestions and details.
///
/// The CLI displays errors through this type so every failure comes with
/// actionable guidance where one exists:
/// - Error message: red and bold
/// - Details: yellow
/// - Suggestion: green
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying mkpkg error
    pub error: MkpkgError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`MkpkgError`].
    #[must_use]
    pub const fn new(error: MkpkgError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining why the error occurred.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// This is the main entry point for converting arbitrary errors into
/// user-friendly messages for CLI display. Known [`MkpkgError`] variants get
/// tailored suggestions; IO and TOML errors get generic filesystem/syntax
/// guidance; anything else is wrapped as-is.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(mkpkg_error) = error.downcast_ref::<MkpkgError>() {
        return contextualize(mkpkg_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MkpkgError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check file ownership or run from a directory you can write to")
                .with_details("mkpkg does not have permission to read or write a required path");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MkpkgError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the target path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(MkpkgError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your mkpkg config file")
        .with_details("Parsing errors are usually caused by missing quotes or mismatched brackets");
    }

    // Fall back to the full anyhow chain so context added with `.context()`
    // is not lost.
    ErrorContext::new(MkpkgError::Other {
        message: format!("{error:#}"),
    })
}

fn contextualize(error: &MkpkgError) -> ErrorContext {
    match error {
        MkpkgError::TargetDirNotEmpty { path } => ErrorContext::new(MkpkgError::TargetDirNotEmpty {
            path: path.clone(),
        })
        .with_suggestion("Run mkpkg inside an empty directory, or pass the path of one")
        .with_details("Only entries starting with '.' are allowed to exist before scaffolding"),

        MkpkgError::OptionConflict { message } => ErrorContext::new(MkpkgError::OptionConflict {
            message: message.clone(),
        })
        .with_suggestion("Run mkpkg --help to see which options combine"),

        MkpkgError::InvalidProjectName { path } => {
            ErrorContext::new(MkpkgError::InvalidProjectName { path: path.clone() })
                .with_suggestion("Scaffold into a directory whose name is a valid npm package name")
        }

        MkpkgError::ConfigError { message } => ErrorContext::new(MkpkgError::ConfigError {
            message: message.clone(),
        })
        .with_suggestion("Fix or delete ~/.mkpkg/config.toml and try again"),

        MkpkgError::FileSystemError { operation, path } => {
            ErrorContext::new(MkpkgError::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            })
            .with_suggestion("Check permissions and available disk space for the target directory")
        }

        other => ErrorContext::new(MkpkgError::Other {
            message: other.to_string(),
        }),
    }
}
