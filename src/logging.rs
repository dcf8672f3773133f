use std::fmt::Display;

/// Verbosity-gated diagnostics on stderr.
///
/// Console output that belongs to the report (targets, summary, failures)
/// does not go through here; see [`crate::report`].
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if !self.quiet && self.verbose >= level {
            eprintln!("{message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(0, true)
    }
}
