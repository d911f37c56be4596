//! Implementation of appfilter-release subcommands.
//!
//! `mod.rs` serves as a thin dispatcher; command logic lives in dedicated
//! modules (`predict`, `diff`, `bump`). The snapshot loading shared by
//! `predict` and `diff` lives here.
//!
//! # Example
//!
//! ```no_run
//! use appfilter_release::cli::Cli;
//! use appfilter_release::commands;
//!
//! let cli = Cli::parse_args();
//! match commands::execute(&cli) {
//!     Ok(true) => {}
//!     Ok(false) => std::process::exit(1),
//!     Err(e) => eprintln!("Error: {e:?}"),
//! }
//! ```

use std::path::Path;

use crate::classify::{ClassificationResult, classify_records};
use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::logging::Logger;
use crate::manifest::{latest_release_tag, load_at_revision, load_working_tree, open_repository};
use crate::version::Version;

pub(crate) mod bump;
pub(crate) mod diff;
pub(crate) mod predict;

pub use bump::bump;
pub use diff::diff;
pub use predict::{Predict, PredictBuilder};


/// Execute commands based on the parsed CLI arguments.
///
/// Returns `Ok(false)` when `predict` decides not to release; every other
/// successful run returns `Ok(true)`.
pub fn execute(cli: &Cli) -> Result<bool> {
    execute_with_dir(cli, None)
}

/// Execute commands against an explicit repository directory, overriding
/// `--repo`.
pub fn execute_with_dir(cli: &Cli, repo_dir: Option<&Path>) -> Result<bool> {
    let quiet = cli.global_opts().quiet();
    let verbose = if quiet {
        0
    } else {
        cli.global_opts().verbose()
    };

    let repo_dir = match repo_dir {
        Some(dir) => dir.to_path_buf(),
        None => cli.global_opts().get_repo_dir(),
    };
    let appfilter = cli.global_opts().appfilter();

    match cli.command() {
        Commands::Predict {
            previous_ref,
            last_version,
            release_day,
            link_threshold,
            new_threshold,
            manual,
            today,
            increment,
            output,
        } => {
            let outputs = Predict::builder()
                .repo_dir(&repo_dir)
                .appfilter(appfilter)
                .previous_ref(previous_ref.as_deref())
                .last_version(last_version.as_deref())
                .release_day(*release_day)
                .link_threshold(*link_threshold)
                .new_threshold(*new_threshold)
                .manual(*manual)
                .today(*today)
                .increment(increment.as_deref())
                .output(output.as_deref())
                .verbose(verbose)
                .quiet(quiet)
                .build()?
                .run()?;
            Ok(outputs.greenlight)
        }
        Commands::Diff { previous_ref } => {
            diff(&repo_dir, appfilter, previous_ref.as_deref(), verbose, quiet)?;
            Ok(true)
        }
        Commands::Bump { from, increment } => {
            bump(from, increment)?;
            Ok(true)
        }
    }
}

/// The appfilter changes since a previous release.
#[derive(Debug)]
pub(crate) struct Comparison {
    /// The git reference the previous manifest was read from
    pub(crate) previous_ref: String,
    /// Version of the previous release, when one could be determined
    pub(crate) last_release: Option<Version>,
    pub(crate) result: ClassificationResult,
}

/// Loads the working-tree and previous appfilter and classifies the changes.
///
/// Without an explicit `previous_ref` the latest release tag is used. An
/// explicit reference that is itself a version (`v2.12.0`) names the last
/// release; any other reference (a branch or commit) falls back to the latest
/// release tag for the version.
pub(crate) fn compare(
    repo_dir: &Path,
    appfilter: &Path,
    previous_ref: Option<&str>,
    log: &Logger,
) -> Result<Comparison> {
    let (repo, workdir) = open_repository(repo_dir)?;

    let (previous_ref, last_release) = match previous_ref {
        Some(reference) => {
            let last_release = match reference.parse::<Version>() {
                Ok(version) => Some(version),
                Err(_) => latest_release_tag(&repo).ok().map(|(_, version)| version),
            };
            (reference.to_string(), last_release)
        }
        None => {
            let (tag, version) = latest_release_tag(&repo)?;
            log.verbose(1, format!("Using latest release tag {tag}"));
            (tag, Some(version))
        }
    };

    let current = load_working_tree(&workdir, appfilter)?;
    let previous = load_at_revision(&repo, &previous_ref, appfilter)?;

    log.verbose(
        1,
        format!(
            "Loaded {} current and {} previous appfilter items ({})",
            current.len(),
            previous.len(),
            appfilter.display()
        ),
    );
    if previous.is_empty() {
        log.warn(format!(
            "{} has no items at {previous_ref}; every icon counts as new",
            appfilter.display()
        ));
    }

    let result = classify_records(&current, &previous)?;

    Ok(Comparison {
        previous_ref,
        last_release,
        result,
    })
}
