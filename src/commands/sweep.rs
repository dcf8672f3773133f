//! The sweep: count, collect, remove, count again, report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::normalize_path;
use crate::collect::{TargetSet, collect_with_logger};
use crate::count::{Counts, count_tree};
use crate::error::{CleanError, Result};
use crate::logging::Logger;
use crate::remove::{RemovalMode, RemovalReport, Remover};
use crate::report::{RunMode, write_banner, write_failures, write_summary};
use crate::trash::TrashRoot;

pub struct Sweep<'a> {
    root: &'a Path,
    apply: bool,
    trash: bool,
    quiet: bool,
    verbose: u8,
}

#[derive(Default)]
pub struct SweepBuilder<'a> {
    root: Option<&'a Path>,
    apply: bool,
    trash: bool,
    quiet: bool,
    verbose: u8,
}

impl<'a> SweepBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, path: &'a Path) -> Self {
        self.root = Some(path);
        self
    }

    pub fn apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    pub fn trash(mut self, trash: bool) -> Self {
        self.trash = trash;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Result<Sweep<'a>> {
        let root = self.root.ok_or_else(|| CleanError::ConfigError {
            message: "Sweep requires a root directory".to_string(),
        })?;

        Ok(Sweep {
            root,
            apply: self.apply,
            trash: self.trash,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}

/// Everything a sweep observed and did.
#[derive(Debug)]
pub struct SweepOutcome {
    /// Canonical scan root
    pub root: PathBuf,
    pub targets: TargetSet,
    pub before: Counts,
    pub after: Counts,
    /// `None` for a dry run
    pub removal: Option<RemovalReport>,
    /// Set whenever `--trash` was requested, even on a dry run
    pub trash: Option<TrashRoot>,
}

impl SweepOutcome {
    pub fn failed(&self) -> bool {
        self.removal
            .as_ref()
            .is_some_and(RemovalReport::has_failures)
    }
}

impl<'a> Sweep<'a> {
    pub fn builder<'b>() -> SweepBuilder<'b> {
        SweepBuilder::new()
    }

    /// Run the sweep, printing the report to stdout.
    pub fn run(self) -> Result<SweepOutcome> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the sweep, writing the report to `out`.
    ///
    /// Only an invalid root is an error; removal failures are part of the
    /// outcome.
    pub fn run_to(self, out: &mut impl Write) -> Result<SweepOutcome> {
        let log = Logger::new(self.verbose, self.quiet);
        let root = resolve_root(self.root)?;

        log.verbose(1, format!("Scanning {}", root.display()));
        let before = count_tree(&root);
        let targets = collect_with_logger(&root, log);
        log.verbose(1, format!("Found {} target(s)", targets.len()));

        let trash = self.trash.then(|| TrashRoot::for_now(&root));
        let mode = RunMode {
            apply: self.apply,
            trash: trash.as_ref(),
        };

        if !self.quiet {
            write_banner(out, &root, mode, &targets).map_err(output_error)?;
        }

        let removal = if self.apply {
            let removal_mode = match &trash {
                Some(trash) => RemovalMode::Trash(trash.clone()),
                None => RemovalMode::Delete,
            };
            let report = Remover::new(&root, removal_mode)
                .logging(self.verbose, self.quiet)
                .apply(&targets);
            if report.has_failures() {
                log.info(format!(
                    "Warning: {} target(s) could not be removed",
                    report.failures.len()
                ));
            }
            Some(report)
        } else {
            None
        };

        let after = count_tree(&root);
        write_summary(out, mode, before, after, removal.as_ref()).map_err(output_error)?;
        if let Some(report) = &removal {
            write_failures(out, &root, &report.failures).map_err(output_error)?;
        }
        out.flush().map_err(output_error)?;

        Ok(SweepOutcome {
            root,
            targets,
            before,
            after,
            removal,
            trash,
        })
    }
}

/// Make `root` absolute, check it is an existing directory, and resolve
/// symlinks.
pub(crate) fn resolve_root(root: &Path) -> Result<PathBuf> {
    let root = normalize_path(root);

    let metadata = match fs::metadata(&root) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CleanError::RootNotFound(root));
        }
        Err(source) => return Err(CleanError::IoError { path: root, source }),
    };
    if !metadata.is_dir() {
        return Err(CleanError::RootNotDirectory(root));
    }

    fs::canonicalize(&root).map_err(|source| CleanError::IoError { path: root, source })
}

fn output_error(source: io::Error) -> CleanError {
    CleanError::IoError {
        path: PathBuf::from("<stdout>"),
        source,
    }
}
