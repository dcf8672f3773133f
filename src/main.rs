//! # tf-clean CLI
//!
//! Removes Terraform-generated state, lock and cache artifacts below a
//! directory. Dry-run by default.
//!
//! ```bash
//! # See what would go
//! tf-clean --root infra
//!
//! # Delete it
//! tf-clean --root infra --apply
//!
//! # Or park it in infra/.tftrash/<timestamp>/
//! tf-clean --root infra --apply --trash
//! ```
//!
//! ## Environment Variables
//!
//! - `TF_CLEAN_ROOT`: Scan root (default: current directory)
//! - `TF_CLEAN_APPLY`: Remove instead of listing
//! - `TF_CLEAN_TRASH`: Move to the trash instead of deleting
//! - `TF_CLEAN_QUIET`: Print only the summary and failures
//! - `TF_CLEAN_VERBOSE`: Verbose diagnostics on stderr

use std::io::IsTerminal;

use tf_clean::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Plain output for CI logs and pipes
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    tf_clean::commands::execute(&cli).map_err(Into::into)
}
