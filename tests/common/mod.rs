use std::path::{Path, PathBuf};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use tf_clean::cli::Cli;
use tf_clean::commands::{SweepOutcome, execute_with_dir};
use tf_clean::error::Result;

/// A scratch tree shaped like a small Terraform repository.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// The three-artifact project used across the end-to-end scenarios:
    /// a provider cache, a state file and a timestamped backup.
    pub fn with_project() -> Self {
        let ws = Self::new();
        ws.file("proj/.terraform/x.tf", "provider");
        ws.file("proj/terraform.tfstate", "{}");
        ws.file("proj/terraform.tfstate.20240101120000.backup", "{}");
        ws
    }

    pub fn file(&self, relative: &str, contents: &str) {
        self.dir.child(relative).write_str(contents).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn canonical(&self) -> PathBuf {
        std::fs::canonicalize(self.dir.path()).unwrap()
    }

    pub fn dir(&self) -> &TempDir {
        &self.dir
    }

    /// Run like the binary would with `--root <relative>`, resolved against
    /// this workspace.
    pub fn run(&self, root: &str, apply: bool, trash: bool) -> Result<SweepOutcome> {
        let cli = Cli::builder()
            .root(root)
            .apply(apply)
            .trash(trash)
            .quiet(true)
            .build()?;
        execute_with_dir(&cli, Some(self.path()))
    }
}
