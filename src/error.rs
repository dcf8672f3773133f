//! Error types for tf-clean.
//!
//! This module defines all error types used throughout tf-clean, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`CleanError`]
//! - Only the startup variants ([`CleanError::RootNotFound`] and
//!   [`CleanError::RootNotDirectory`]) ever abort a run
//! - Per-target removal errors are collected into
//!   [`FailureRecord`](crate::remove::FailureRecord)s and reported at the end
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tf_clean::error::{CleanError, Result};
//!
//! fn check_root(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(CleanError::RootNotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in tf-clean operations
#[derive(Error, Debug, Diagnostic)]
pub enum CleanError {
    /// The scan root does not exist.
    ///
    /// Raised before any scanning happens. This is one of the two fatal
    /// conditions; the binary exits non-zero.
    #[error("root not found: {}", .0.display())]
    #[diagnostic(
        code(tf_clean::root::not_found),
        help("Pass an existing directory with --root, or run from inside the Terraform tree.")
    )]
    RootNotFound(
        /// The root path as given, made absolute
        PathBuf,
    ),

    /// The scan root exists but is not a directory.
    #[error("root is not a directory: {}", .0.display())]
    #[diagnostic(
        code(tf_clean::root::not_a_directory),
        help("--root must point at a directory, not a file.")
    )]
    RootNotDirectory(
        /// The offending root path
        PathBuf,
    ),

    /// File system I/O error outside of per-target removal.
    ///
    /// Used for resolving the working directory, canonicalising the root and
    /// creating the trash root.
    #[error("I/O error accessing '{}': {source}", .path.display())]
    #[diagnostic(code(tf_clean::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Deleting a target (or an entry inside a target directory) failed even
    /// after clearing its read-only attribute.
    #[error("failed to remove '{}': {source}", .path.display())]
    #[diagnostic(
        code(tf_clean::remove::delete_failed),
        help("Something may still hold the path open; see the hints printed after the summary.")
    )]
    RemoveError {
        /// The entry whose removal failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Moving a target into the trash root failed.
    #[error(
        "failed to move '{}' to '{}': {source}",
        .path.display(),
        .destination.display()
    )]
    #[diagnostic(code(tf_clean::remove::trash_failed))]
    TrashError {
        /// The target being moved
        path: PathBuf,
        /// Where it was being moved to
        destination: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid programmatic configuration, such as a builder missing a
    /// required field.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(tf_clean::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

impl CleanError {
    /// Returns true for the errors that stop a run before scanning starts.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CleanError::RootNotFound(_) | CleanError::RootNotDirectory(_)
        )
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CleanError>;
