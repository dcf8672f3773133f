//! Target collection.
//!
//! A single top-down walk of the scan root classifies every entry by name.
//! Matched directories are recorded and never entered: a `.terraform` cache
//! can hold thousands of provider files and nothing inside it needs a
//! separate decision. The trash directory is skipped entirely so trashed
//! state files are not picked up again on the next run.
//!
//! The resulting [`TargetSet`] is deduplicated by canonical path and ordered
//! deepest-first so a removal pass never deletes a directory before a target
//! nested inside it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::classify::{is_target_directory, is_target_file, is_trash_directory};
use crate::logging::Logger;


/// A file or directory selected for cleanup.
///
/// Whether it is a file or a directory is decided when it is removed, not
/// stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    path: PathBuf,
    canonical: PathBuf,
}

impl Target {
    /// Build a target from a walked path, resolving symlinks for its identity.
    ///
    /// Paths that cannot be resolved (a dangling symlink, say) keep their
    /// walked form as the canonical key.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        Self { path, canonical }
    }

    /// The absolute path the target was found at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The resolved path used for deduplication and ordering.
    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    /// The target's path relative to `root`, or the full path if it does not
    /// live under `root`.
    pub fn relative_to(&self, root: &Path) -> &Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}

/// Deduplicated targets, deepest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSet {
    targets: Vec<Target>,
}

impl TargetSet {
    /// Deduplicate `paths` by canonical path and order them for removal.
    ///
    /// The first path seen for a canonical location is kept. Ordering is by
    /// descending length of the canonical path; a nested target always has a
    /// strictly longer path than any ancestor, so it is removed first. Ties
    /// are broken by path so the order is reproducible.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        let mut targets: Vec<Target> = paths
            .into_iter()
            .map(Target::new)
            .filter(|target| seen.insert(target.canonical.clone()))
            .collect();

        targets.sort_by(|a, b| {
            let a_len = a.canonical.as_os_str().len();
            let b_len = b.canonical.as_os_str().len();
            b_len.cmp(&a_len).then_with(|| a.canonical.cmp(&b.canonical))
        });

        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

/// Collect all cleanup targets below `root`.
///
/// Never fails: unreadable subtrees are skipped.
pub fn collect(root: &Path) -> TargetSet {
    collect_with_logger(root, Logger::default())
}

pub(crate) fn collect_with_logger(root: &Path, log: Logger) -> TargetSet {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                log.verbose(2, format!("  Skipping unreadable entry: {err}"));
                continue;
            }
        };

        // Non UTF-8 names cannot match any artifact name.
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        let file_type = entry.file_type();
        let is_dir = file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir());

        if is_dir {
            let matched = is_target_directory(name);
            if matched {
                log.verbose(2, format!("  Found directory target {}", entry.path().display()));
                found.push(entry.path().to_path_buf());
            }
            // Symlinks are never descended into, and skipping after one would
            // drop its siblings instead.
            if (matched || is_trash_directory(name)) && file_type.is_dir() {
                walker.skip_current_dir();
            }
        } else if is_target_file(name) {
            log.verbose(2, format!("  Found file target {}", entry.path().display()));
            found.push(entry.path().to_path_buf());
        }
    }

    TargetSet::from_paths(found)
}
