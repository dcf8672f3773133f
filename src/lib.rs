//! # tf-clean
//!
//! Finds the files and directories Terraform leaves behind in a working tree
//! and removes them, or moves them into a timestamped trash.
//!
//! ## What counts as an artifact
//!
//! - Directories: `.terraform` (provider and module cache) and
//!   `terraform.tfstate.d` (workspace state). These are removed whole and
//!   never scanned inside.
//! - Files: `terraform.tfstate`, `terraform.tfstate.backup`,
//!   `.terraform.lock.hcl`, `lock.hcl`, and timestamped backups such as
//!   `terraform.tfstate.1700000000.backup`.
//!
//! ## Flow
//!
//! 1. Count files and directories below the root ([`count`])
//! 2. Walk the tree once and collect targets ([`collect`]), deepest first
//! 3. With `--apply`, delete each target or move it into
//!    `<root>/.tftrash/<timestamp>/` ([`remove`], [`trash`])
//! 4. Count again and print the summary ([`report`])
//!
//! A target that cannot be removed never stops the run; it is listed at the
//! end together with hints on what usually holds such paths open.
//!
//! ## Library Usage
//!
//! ```no_run
//! use tf_clean::collect::collect;
//! use tf_clean::remove::{RemovalMode, Remover};
//!
//! let root = std::fs::canonicalize("infra")?;
//! let targets = collect(&root);
//! let report = Remover::new(&root, RemovalMode::Delete).apply(&targets);
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.target().path().display(), failure.error());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI

pub mod classify;
pub mod cli;
pub mod collect;
pub mod commands;
pub mod count;
pub mod error;
pub mod remove;
pub mod report;
pub mod trash;

mod logging;
