//! Console report: banner, target list, summary and failure hints.
//!
//! The format is line-oriented and meant for people, not parsers, though it
//! is kept stable enough to grep in smoke tests.

use std::io::{self, Write};
use std::path::Path;

use crate::collect::TargetSet;
use crate::count::Counts;
use crate::remove::{FailureRecord, RemovalReport};
use crate::trash::TrashRoot;

/// Printed after the failure list.
pub const REMEDIATION_HINTS: [&str; 4] = [
    "close any editor window opened on this folder (VS Code in particular)",
    "stop any terminal whose working directory is inside these folders",
    "if Defender or another antivirus is scanning, pause it briefly",
    "rerun: tf-clean --apply --trash",
];

/// How the run was configured, for the banner and summary.
#[derive(Clone, Copy, Debug)]
pub struct RunMode<'a> {
    pub apply: bool,
    pub trash: Option<&'a TrashRoot>,
}

impl RunMode<'_> {
    /// `DRY-RUN` or `APPLY`, annotated when trash mode is requested.
    pub fn label(&self) -> String {
        let base = if self.apply { "APPLY" } else { "DRY-RUN" };
        match self.trash {
            Some(trash) if self.apply => format!("{base} + TRASH({})", trash.path().display()),
            Some(_) => format!("{base} + TRASH(prep)"),
            None => base.to_string(),
        }
    }
}

/// Root, mode and one line per target, relative to the root.
pub fn write_banner(
    out: &mut impl Write,
    root: &Path,
    mode: RunMode<'_>,
    targets: &TargetSet,
) -> io::Result<()> {
    writeln!(out, "root: {}", root.display())?;
    writeln!(out, "mode: {}", mode.label())?;
    writeln!(out, "targets:")?;
    for target in targets {
        writeln!(out, "  - {}", target.relative_to(root).display())?;
    }
    Ok(())
}

/// Before/deleted/after counts. `removal` is `None` for a dry run.
pub fn write_summary(
    out: &mut impl Write,
    mode: RunMode<'_>,
    before: Counts,
    after: Counts,
    removal: Option<&RemovalReport>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "summary:")?;
    writeln!(
        out,
        "  total before: dirs={}, files={}",
        before.dirs, before.files
    )?;
    match removal {
        Some(report) => writeln!(
            out,
            "  deleted     : dirs={}, files={}",
            report.dirs_removed, report.files_removed
        )?,
        None => writeln!(out, "  deleted     : dirs=0, files=0 (dry-run)")?,
    }
    writeln!(
        out,
        "  remaining   : dirs={}, files={}",
        after.dirs, after.files
    )?;

    if mode.apply
        && let Some(trash) = mode.trash
    {
        if trash.path().exists() {
            writeln!(out, "  trash path  : {}", trash.path().display())?;
        } else {
            writeln!(
                out,
                "  trash path  : {} (not created, nothing moved)",
                trash.path().display()
            )?;
        }
    }
    Ok(())
}

/// The `failed:` block and remediation hints. Writes nothing when there are
/// no failures.
pub fn write_failures(
    out: &mut impl Write,
    root: &Path,
    failures: &[FailureRecord],
) -> io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "failed:")?;
    for failure in failures {
        writeln!(
            out,
            "  - {} -> {}",
            failure.target().relative_to(root).display(),
            failure.error()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "fix:")?;
    for hint in REMEDIATION_HINTS {
        writeln!(out, "  - {hint}")?;
    }
    Ok(())
}
