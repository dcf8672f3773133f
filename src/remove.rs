//! Removal of collected targets.
//!
//! Targets are either deleted in place or moved into a [`TrashRoot`]. Each
//! target is attempted independently: a failure is recorded in the returned
//! [`RemovalReport`] and the run moves on to the next target.
//!
//! Every step treats "already gone" as done. Editors, language servers and
//! `terraform` itself may be touching the same tree, and a target nested in
//! an already-removed directory target simply disappears.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::collect::{Target, TargetSet};
use crate::error::{CleanError, Result};
use crate::logging::Logger;
use crate::trash::TrashRoot;


/// What happens to each target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemovalMode {
    /// Delete permanently.
    Delete,
    /// Move below the given trash root, keeping the path relative to the
    /// scan root.
    Trash(TrashRoot),
}

/// A target that could not be removed, and why.
#[derive(Debug)]
pub struct FailureRecord {
    target: Target,
    error: CleanError,
}

impl FailureRecord {
    pub fn new(target: Target, error: CleanError) -> Self {
        Self { target, error }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn error(&self) -> &CleanError {
        &self.error
    }
}

/// Outcome of a removal pass.
///
/// Targets that no longer existed when their turn came are neither counted
/// nor listed as failures.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub dirs_removed: u64,
    pub files_removed: u64,
    pub failures: Vec<FailureRecord>,
}

impl RemovalReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Removes an ordered [`TargetSet`] below a scan root.
#[derive(Debug)]
pub struct Remover<'a> {
    root: &'a Path,
    mode: RemovalMode,
    verbose: u8,
    quiet: bool,
}

impl<'a> Remover<'a> {
    pub fn new(root: &'a Path, mode: RemovalMode) -> Self {
        Self {
            root,
            mode,
            verbose: 0,
            quiet: true,
        }
    }

    /// Enable diagnostics on stderr.
    pub fn logging(mut self, verbose: u8, quiet: bool) -> Self {
        self.verbose = verbose;
        self.quiet = quiet;
        self
    }

    /// Remove every target, in the order given.
    pub fn apply(&self, targets: &TargetSet) -> RemovalReport {
        let log = Logger::new(self.verbose, self.quiet);
        let mut trash_ready = false;

        self.apply_with(targets, |path| match &self.mode {
            RemovalMode::Delete => delete_if_present(path),
            RemovalMode::Trash(trash) => {
                if !trash_ready {
                    trash.ensure()?;
                    log.verbose(1, format!("Created trash root {}", trash.path().display()));
                    trash_ready = true;
                }
                let moved = move_to_trash(self.root, path, trash)?;
                if let Some(dest) = &moved {
                    log.verbose(2, format!("  Moved to {}", dest.display()));
                }
                Ok(moved.is_some())
            }
        })
    }

    /// Drive `remove` over the targets, re-checking existence and tallying
    /// results. The target's kind is read just before `remove` runs, and
    /// `remove` returns `false` when the target vanished before it got there.
    pub(crate) fn apply_with<F>(&self, targets: &TargetSet, mut remove: F) -> RemovalReport
    where
        F: FnMut(&Path) -> Result<bool>,
    {
        let log = Logger::new(self.verbose, self.quiet);
        let mut report = RemovalReport::default();

        for target in targets {
            let path = target.path();
            let metadata = match fs::symlink_metadata(path) {
                Ok(metadata) => metadata,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log.verbose(2, format!("  Already gone: {}", path.display()));
                    continue;
                }
                Err(source) => {
                    report.failures.push(FailureRecord::new(
                        target.clone(),
                        CleanError::IoError {
                            path: path.to_path_buf(),
                            source,
                        },
                    ));
                    continue;
                }
            };

            let is_dir =
                metadata.is_dir() || (metadata.file_type().is_symlink() && path.is_dir());
            log.verbose(1, format!("Removing {}", target.relative_to(self.root).display()));

            match remove(path) {
                Ok(false) => log.verbose(2, format!("  Already gone: {}", path.display())),
                Ok(true) if is_dir => report.dirs_removed += 1,
                Ok(true) => report.files_removed += 1,
                Err(error) => {
                    log.verbose(1, format!("  Failed: {error}"));
                    report
                        .failures
                        .push(FailureRecord::new(target.clone(), error));
                }
            }
        }

        report
    }
}

/// Delete a file or directory tree permanently.
///
/// Directory trees are removed bottom-up. An entry that fails with a
/// permission error has its read-only attribute cleared and is retried once.
/// A file target has its read-only attribute cleared before deletion. Paths
/// that vanish along the way are not errors.
pub fn delete_target(path: &Path) -> Result<()> {
    delete_if_present(path).map(|_| ())
}

/// Like [`delete_target`], returning `false` when `path` was already gone.
pub(crate) fn delete_if_present(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(CleanError::RemoveError {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if metadata.is_dir() {
        return remove_tree(path, None).map(|()| true);
    }

    // Ignorable: if this fails, the removal below reports the real problem.
    let _ = clear_readonly(path);
    match remove_entry(path, metadata.file_type()) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(CleanError::RemoveError {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Move `target` into `trash`, returning where it ended up, or `None` when
/// `target` no longer exists.
///
/// Uses a rename, falling back to copy-then-delete when the trash lives on
/// another filesystem. Nothing is created in the trash for a missing target.
pub fn move_to_trash(root: &Path, target: &Path, trash: &TrashRoot) -> Result<Option<PathBuf>> {
    match fs::symlink_metadata(target) {
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CleanError::IoError {
                path: target.to_path_buf(),
                source,
            });
        }
    }

    let dest = trash.destination_for(root, target);
    let trash_error = |source: io::Error| CleanError::TrashError {
        path: target.to_path_buf(),
        destination: dest.clone(),
        source,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(trash_error)?;
    }

    match fs::rename(target, &dest) {
        Ok(()) => Ok(Some(dest)),
        Err(err) if err.kind() == io::ErrorKind::NotFound && !target_exists(target) => {
            // Vanished after the check above; drop the parents made for it.
            if let Some(parent) = dest.parent() {
                prune_empty_dirs(parent, trash.path());
            }
            Ok(None)
        }
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            copy_tree(target, &dest).map_err(trash_error)?;
            delete_target(target)?;
            Ok(Some(dest))
        }
        Err(err) => Err(trash_error(err)),
    }
}

fn target_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove `dir` and its empty ancestors, stopping at `stop`.
fn prune_empty_dirs(dir: &Path, stop: &Path) {
    let mut current = Some(dir);
    while let Some(dir) = current {
        if dir == stop || !dir.starts_with(stop) || fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}

/// Remove the tree below and including `dir`, deepest entries first.
///
/// A directory that cannot be listed gets its permissions fixed up and its
/// subtree is walked again; `fixed` is the directory already fixed up by the
/// caller, which is not fixed a second time.
fn remove_tree(dir: &Path, fixed: Option<&Path>) -> Result<()> {
    for entry in WalkDir::new(dir).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                let source = io::Error::from(err);
                match source.kind() {
                    io::ErrorKind::NotFound => continue,
                    io::ErrorKind::PermissionDenied if fixed != Some(path.as_path()) => {
                        // Ignorable: the second walk reports what still fails.
                        let _ = clear_readonly(&path);
                        remove_tree(&path, Some(&path))?;
                        continue;
                    }
                    _ => return Err(CleanError::RemoveError { path, source }),
                }
            }
        };

        remove_with_retry(entry.path(), entry.file_type(), dir)?;
    }

    Ok(())
}

/// Remove one entry of the tree rooted at `top`. Permission fix-ups touch
/// only paths inside that tree.
fn remove_with_retry(path: &Path, file_type: fs::FileType, top: &Path) -> Result<()> {
    match remove_entry(path, file_type) {
        Ok(()) => return Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) if err.kind() != io::ErrorKind::PermissionDenied => {
            return Err(CleanError::RemoveError {
                path: path.to_path_buf(),
                source: err,
            });
        }
        Err(_) => {}
    }

    // Ignorable: only the retried removal's outcome is reported.
    let _ = clear_readonly(path);
    #[cfg(unix)]
    {
        // Unlinking needs write access on the containing directory.
        if let Some(parent) = path.parent().filter(|parent| parent.starts_with(top)) {
            let _ = clear_readonly(parent);
        }
    }

    match remove_entry(path, file_type) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(CleanError::RemoveError {
            path: path.to_path_buf(),
            source: err,
        }),
        _ => Ok(()),
    }
}

fn remove_entry(path: &Path, file_type: fs::FileType) -> io::Result<()> {
    if file_type.is_dir() || is_dir_symlink(file_type) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(windows)]
fn is_dir_symlink(file_type: fs::FileType) -> bool {
    use std::os::windows::fs::FileTypeExt;
    file_type.is_symlink_dir()
}

#[cfg(not(windows))]
fn is_dir_symlink(_file_type: fs::FileType) -> bool {
    false
}

/// Give the owner write access to `path`. Symlinks are left alone since
/// permission changes would land on whatever they point at.
fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }

    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let wanted = if metadata.is_dir() { 0o700 } else { 0o200 };
        let mode = permissions.mode();
        if mode & wanted == wanted {
            return Ok(());
        }
        permissions.set_mode(mode | wanted);
    }

    #[cfg(not(unix))]
    {
        if !permissions.readonly() {
            return Ok(());
        }
        permissions.set_readonly(false);
    }

    fs::set_permissions(path, permissions)
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    if fs::symlink_metadata(src)?.file_type().is_symlink() {
        return copy_symlink(src, dest);
    }

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| io::Error::other(err.to_string()))?;
        let out = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&out)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &out)?;
        } else {
            fs::copy(entry.path(), &out)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest).map(|_| ())
}
