//! Command execution for tf-clean.
//!
//! `mod.rs` is a thin dispatcher: it turns the parsed [`Cli`] into a
//! [`Sweep`] and runs it. The scan/remove/report flow lives in `sweep`.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{CleanError, Result};

pub(crate) mod sweep;

pub use sweep::{Sweep, SweepBuilder, SweepOutcome};


/// Execute a run based on the parsed CLI arguments, printing to stdout.
pub fn execute(cli: &Cli) -> Result<()> {
    execute_with_dir(cli, None).map(|_| ())
}

/// Execute a run with an explicit working directory against which a relative
/// `--root` is resolved.
pub fn execute_with_dir(cli: &Cli, working_dir: Option<&Path>) -> Result<SweepOutcome> {
    let current_dir = if let Some(dir) = working_dir {
        dir.to_path_buf()
    } else {
        std::env::current_dir().map_err(|source| CleanError::IoError {
            path: PathBuf::from("."),
            source,
        })?
    };
    let root = current_dir.join(cli.root());

    let quiet = cli.quiet();
    let verbose = if quiet { 0 } else { cli.verbose() };

    Sweep::builder()
        .root(&root)
        .apply(cli.apply())
        .trash(cli.trash())
        .quiet(quiet)
        .verbose(verbose)
        .build()?
        .run()
}
