//! # appfilter-release CLI
//!
//! Decides whether an icon pack release should be cut and which version it
//! gets, based on how many icons were added to the appfilter since the last
//! release tag.
//!
//! ## Commands
//!
//! - **predict**: Main CI command - prints the next version, exits 1 unless
//!   the release is greenlit
//! - **diff**: Shows new and linked icons since the previous release
//! - **bump**: Bumps a version by an explicit increment
//!
//! ## Environment Variables
//!
//! - `APPFILTER_RELEASE_REPO`: Path inside the repository (default: .)
//! - `APPFILTER_RELEASE_APPFILTER`: Manifest path relative to the repo root
//! - `APPFILTER_RELEASE_DAY`: Release day of the month (default: 1)
//! - `APPFILTER_RELEASE_LINK_THRESHOLD`: Minimum linked icons (default: 20)
//! - `APPFILTER_RELEASE_NEW_THRESHOLD`: Minimum new icons (default: 100)
//! - `APPFILTER_RELEASE_MANUAL`: Release regardless of day and counts
//! - `GITHUB_OUTPUT`: File that receives `key=value` results
//!
//! See `appfilter-release predict --help` for the rest.

use std::io::IsTerminal;
use std::process::ExitCode;

use appfilter_release::cli::Cli;

fn main() -> miette::Result<ExitCode> {
    miette::set_panic_hook();

    // CI logs get plain output without box drawing or context lines
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    let greenlight = appfilter_release::commands::execute(&cli)?;

    Ok(if greenlight {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
