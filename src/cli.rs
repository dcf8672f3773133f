//! Command-line interface definitions for tf-clean.
//!
//! This module defines the CLI structure using clap. The main entry point is
//! the [`Cli`] struct; every flag can also be supplied through a `TF_CLEAN_*`
//! environment variable.
//!
//! # Example
//!
//! ```no_run
//! use tf_clean::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! if cli.apply() {
//!     println!("Cleaning {}", cli.get_root().display());
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{CleanError, Result};

#[cfg(test)]
mod tests;

/// Command-line interface for tf-clean.
///
/// Without `--apply` nothing is touched: the targets are listed and the
/// summary shows what would have been removed.
#[derive(Debug, Parser)]
#[command(
    name = "tf-clean",
    bin_name = "tf-clean",
    author,
    version,
    about = "Find and remove Terraform state, lock and cache artifacts (dry-run by default)",
    long_about = None
)]
pub struct Cli {
    /// Root of the tree to scan (defaults to the current directory)
    #[arg(long, default_value = ".", env = "TF_CLEAN_ROOT")]
    root: PathBuf,

    /// Actually remove the targets (default is a dry run)
    #[arg(long, env = "TF_CLEAN_APPLY")]
    apply: bool,

    /// Move targets into <root>/.tftrash/<timestamp>/ instead of deleting
    /// them
    #[arg(long, env = "TF_CLEAN_TRASH")]
    trash: bool,

    /// Only print the summary and failures
    #[arg(short, long, conflicts_with = "verbose", env = "TF_CLEAN_QUIET")]
    quiet: bool,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "TF_CLEAN_VERBOSE")]
    verbose: u8,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// The root as given on the command line
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root made absolute, with `.` and `..` removed
    pub fn get_root(&self) -> PathBuf {
        normalize_path(&self.root)
    }

    pub fn apply(&self) -> bool {
        self.apply
    }

    pub fn trash(&self) -> bool {
        self.trash
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    root: Option<PathBuf>,
    apply: bool,
    trash: bool,
    quiet: bool,
    verbose: u8,
}

impl CliBuilder {
    /// Set the scan root
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Remove targets instead of only listing them
    pub fn apply(mut self, enabled: bool) -> Self {
        self.apply = enabled;
        self
    }

    /// Move targets to the trash instead of deleting them
    pub fn trash(mut self, enabled: bool) -> Self {
        self.trash = enabled;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        if self.quiet && self.verbose > 0 {
            return Err(CleanError::ConfigError {
                message: "quiet and verbose cannot be combined".to_string(),
            });
        }

        Ok(Cli {
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            apply: self.apply,
            trash: self.trash,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// This function:
/// - Converts relative paths to absolute using the current directory
/// - Removes `.` and `..` components where possible
/// - Does NOT resolve symlinks (the root is canonicalised after validation)
/// - Does NOT require the path to exist, so a missing root can be reported
///   with its full path
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        use std::path::Component;
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && matches!(last, Component::Normal(_))
                {
                    components.pop();
                    continue;
                }
                if matches!(components.last(), Some(Component::RootDir)) {
                    // `/..` is `/`
                    continue;
                }
                components.push(component);
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    let mut result = PathBuf::new();
    for component in components {
        result.push(component);
    }

    result
}
