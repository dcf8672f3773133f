use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Cli, normalize_path};
use crate::error::CleanError;

#[test]
fn test_cli_defaults() {
    let cli = Cli::parse_from(["tf-clean"]);
    assert_eq!(cli.root(), Path::new("."));
    assert!(cli.get_root().is_absolute());
    assert!(!cli.apply());
    assert!(!cli.trash());
    assert!(!cli.quiet());
    assert_eq!(cli.verbose(), 0);
}

#[test]
fn test_all_flags() {
    let cli = Cli::parse_from([
        "tf-clean", "--root", "infra", "--apply", "--trash", "--quiet",
    ]);
    assert_eq!(cli.root(), Path::new("infra"));
    assert!(cli.get_root().ends_with("infra"));
    assert!(cli.apply());
    assert!(cli.trash());
    assert!(cli.quiet());
}

#[test]
fn test_verbose_flag() {
    let cli = Cli::parse_from(["tf-clean", "-vv"]);
    assert_eq!(cli.verbose(), 2);
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["tf-clean", "-q", "-v"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_builder() {
    let cli = Cli::builder()
        .root("envs/prod")
        .apply(true)
        .trash(true)
        .verbose(1)
        .build()
        .expect("Failed to build CLI");

    assert_eq!(cli.root(), Path::new("envs/prod"));
    assert!(cli.apply());
    assert!(cli.trash());
    assert!(!cli.quiet());
    assert_eq!(cli.verbose(), 1);

    let cli = Cli::builder().build().expect("Failed to build CLI");
    assert_eq!(cli.root(), Path::new("."));
    assert!(!cli.apply());
}

#[test]
fn test_builder_rejects_quiet_verbose() {
    let err = Cli::builder().quiet(true).verbose(1).build().unwrap_err();
    assert!(matches!(err, CleanError::ConfigError { .. }));
}

#[test]
fn test_normalize_path() {
    let normalized = normalize_path("./infra/./prod");
    assert!(normalized.is_absolute());
    assert!(!normalized.to_string_lossy().contains("/./"));

    let normalized = normalize_path("infra/../other/prod");
    assert!(normalized.is_absolute());
    assert!(normalized.ends_with("other/prod"));
    assert!(!normalized.to_string_lossy().contains(".."));

    let abs_path = if cfg!(windows) {
        PathBuf::from("C:\\Users\\test")
    } else {
        PathBuf::from("/home/test")
    };
    assert_eq!(normalize_path(&abs_path), abs_path);

    let normalized = normalize_path("./a/b/../c/./d/../e");
    assert!(normalized.ends_with("a/c/e"));
}

#[cfg(unix)]
#[test]
fn test_normalize_path_does_not_climb_above_root() {
    assert_eq!(normalize_path("/../../etc"), PathBuf::from("/etc"));
}
