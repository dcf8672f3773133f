//! Before/after entry counts for the summary.

use std::path::Path;

use walkdir::WalkDir;

/// Snapshot of how many files and directories live below a root.
///
/// The root itself is not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub files: u64,
    pub dirs: u64,
}

impl Counts {
    pub fn new(files: u64, dirs: u64) -> Self {
        Self { files, dirs }
    }
}

/// Count every file and directory below `root`.
///
/// Symlinks are not followed; a symlink pointing at a directory counts as a
/// directory. Unreadable subtrees are skipped.
pub fn count_tree(root: &Path) -> Counts {
    let mut counts = Counts::default();

    for entry in WalkDir::new(root).min_depth(1).into_iter().flatten() {
        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            counts.dirs += 1;
        } else {
            counts.files += 1;
        }
    }

    counts
}
