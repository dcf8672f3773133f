//! The timestamped trash area used by `--apply --trash`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::classify::TRASH_DIR;
use crate::error::{CleanError, Result};

/// Format of the per-run directory name below `.tftrash`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Format of the suffix appended when a destination already exists.
const SUFFIX_FORMAT: &str = "%H%M%S%6f";

/// `<root>/.tftrash/<timestamp>`, created on first use and never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrashRoot {
    path: PathBuf,
}

impl TrashRoot {
    /// Trash root for `root` with an explicit run timestamp.
    pub fn new(root: &Path, timestamp: &str) -> Self {
        Self {
            path: root.join(TRASH_DIR).join(timestamp),
        }
    }

    /// Trash root for `root` stamped with the current local time.
    pub fn for_now(root: &Path) -> Self {
        Self::new(root, &Local::now().format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the trash root if it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.path).map_err(|source| CleanError::IoError {
            path: self.path.clone(),
            source,
        })
    }

    /// Where `target` goes: its path relative to `root`, re-rooted under the
    /// trash root.
    ///
    /// If something already occupies that name, a time-based suffix is
    /// appended (and a counter after that, if needed) so existing trash is
    /// never overwritten. Targets outside `root` keep only their file name.
    pub fn destination_for(&self, root: &Path, target: &Path) -> PathBuf {
        let relative = match target.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => target
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("unnamed")),
        };
        let dest = self.path.join(relative);

        if !occupied(&dest) {
            return dest;
        }

        let suffix = Local::now().format(SUFFIX_FORMAT).to_string();
        let candidate = with_suffix(&dest, &suffix);
        if !occupied(&candidate) {
            return candidate;
        }

        (1u32..)
            .map(|n| with_suffix(&dest, &format!("{suffix}-{n}")))
            .find(|candidate| !occupied(candidate))
            .unwrap_or(candidate)
    }
}

/// Broken symlinks count as occupying their name.
fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_trash_root_layout() {
        let trash = TrashRoot::new(Path::new("/work"), "20240101-120000");
        assert_eq!(trash.path(), Path::new("/work/.tftrash/20240101-120000"));
    }

    #[test]
    fn test_for_now_uses_timestamp_format() {
        let trash = TrashRoot::for_now(Path::new("/work"));
        let stamp = trash.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(stamp.len(), "YYYYMMDD-HHMMSS".len());
        assert_eq!(stamp.as_bytes()[8], b'-');
        assert!(stamp.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_destination_preserves_relative_path() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let trash = TrashRoot::new(root, "ts");

        let dest = trash.destination_for(root, &root.join("state/terraform.tfstate"));
        assert_eq!(dest, root.join(".tftrash/ts/state/terraform.tfstate"));
    }

    #[test]
    fn test_ensure_is_lazy_and_repeatable() {
        let temp = TempDir::new().unwrap();
        let trash = TrashRoot::new(temp.path(), "ts");
        assert!(!trash.path().exists());

        trash.ensure().unwrap();
        trash.ensure().unwrap();
        assert!(trash.path().is_dir());
    }

    #[test]
    fn test_existing_destination_gets_suffix() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let trash = TrashRoot::new(root, "ts");
        let taken = root.join(".tftrash/ts/state/terraform.tfstate");
        fs::create_dir_all(taken.parent().unwrap()).unwrap();
        fs::write(&taken, "old").unwrap();

        let dest = trash.destination_for(root, &root.join("state/terraform.tfstate"));
        assert_ne!(dest, taken);
        assert_eq!(dest.parent(), taken.parent());
        let name = dest.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("terraform.tfstate."));
        assert!(!dest.exists());
    }

    #[test]
    fn test_target_outside_root_keeps_file_name() {
        let trash = TrashRoot::new(Path::new("/nonexistent-root"), "ts");
        let dest = trash.destination_for(
            Path::new("/nonexistent-root"),
            Path::new("/elsewhere/terraform.tfstate"),
        );
        assert_eq!(
            dest,
            Path::new("/nonexistent-root/.tftrash/ts/terraform.tfstate")
        );
    }
}
