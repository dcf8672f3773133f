//! Name-based classification of Terraform artifacts.
//!
//! Both predicates look at a single path component only. They never touch
//! the filesystem, so they are safe to call on names of entries that have
//! already disappeared.

/// Provider/module cache directory created by `terraform init`.
pub const PLUGIN_CACHE_DIR: &str = ".terraform";

/// Per-workspace state directory used by the local backend.
pub const WORKSPACE_STATE_DIR: &str = "terraform.tfstate.d";

/// Directory (directly under the scan root) that holds trashed targets.
pub const TRASH_DIR: &str = ".tftrash";

const TARGET_DIRECTORIES: [&str; 2] = [PLUGIN_CACHE_DIR, WORKSPACE_STATE_DIR];

const TARGET_FILES: [&str; 4] = [
    "terraform.tfstate",
    "terraform.tfstate.backup",
    ".terraform.lock.hcl",
    "lock.hcl",
];

/// Prefix of a timestamped state backup, e.g.
/// `terraform.tfstate.1700000000.backup`.
const STATE_BACKUP_PREFIX: &str = "terraform.tfstate.";
const STATE_BACKUP_SUFFIX: &str = ".backup";

/// Returns true if a directory with this name is removed as a whole.
pub fn is_target_directory(name: &str) -> bool {
    TARGET_DIRECTORIES.contains(&name)
}

/// Returns true if a file with this name is a Terraform artifact.
///
/// Besides the fixed names, any `terraform.tfstate.<token>.backup` matches.
/// Prefix and suffix must both hold for the same name; they may share the
/// dot between them, so `terraform.tfstate.backup` is covered either way.
pub fn is_target_file(name: &str) -> bool {
    if TARGET_FILES.contains(&name) {
        return true;
    }

    name.starts_with(STATE_BACKUP_PREFIX) && name.ends_with(STATE_BACKUP_SUFFIX)
}

/// Returns true for the trash directory, which the collector never enters.
pub fn is_trash_directory(name: &str) -> bool {
    name == TRASH_DIR
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_target_directories() {
        assert!(is_target_directory(".terraform"));
        assert!(is_target_directory("terraform.tfstate.d"));

        for name in [
            "terraform",
            ".terraform.d",
            ".Terraform",
            "terraform.tfstate",
            "modules",
            ".tftrash",
            "",
        ] {
            assert!(!is_target_directory(name), "{name:?} is not a target dir");
        }
    }

    #[test]
    fn test_exact_target_files() {
        for name in TARGET_FILES {
            assert!(is_target_file(name), "{name:?} should match");
        }
    }

    #[test]
    fn test_timestamped_backups() {
        assert!(is_target_file("terraform.tfstate.20240101120000.backup"));
        assert!(is_target_file("terraform.tfstate.1700000000.backup"));
    }

    #[test]
    fn test_rejects_near_misses() {
        let rejected = [
            "terraform.tfstate.backup.old",
            "old.terraform.tfstate",
            "my-terraform.tfstate.1.backup",
            "terraform.tfstate.1.backup~",
            "terraform.tfstate.json",
            "lock.hcl.bak",
            "main.tf",
            "variables.tf",
            ".terraform.lock",
            "",
        ];
        for name in rejected {
            assert!(!is_target_file(name), "{name:?} should not match");
        }
    }

    #[test]
    fn test_trash_directory() {
        assert!(is_trash_directory(".tftrash"));
        assert!(!is_trash_directory("tftrash"));
        assert!(!is_target_directory(TRASH_DIR));
    }

    proptest! {
        #[test]
        fn test_any_backup_token_matches(token in "[A-Za-z0-9._-]{1,24}") {
            let name = format!("terraform.tfstate.{token}.backup");
            prop_assert!(is_target_file(&name));
        }

        #[test]
        fn test_backup_with_trailing_text_rejected(
            token in "[0-9]{1,14}",
            tail in "[a-z~]{1,5}",
        ) {
            let name = format!("terraform.tfstate.{token}.backup.{tail}");
            prop_assert!(!is_target_file(&name));
        }

        #[test]
        fn test_lowercase_words_are_not_targets(name in "[a-z]{1,12}") {
            prop_assert!(!is_target_directory(&name));
            prop_assert!(!is_target_file(&name));
        }
    }
}
