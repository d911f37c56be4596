//! Command-line interface definitions for appfilter-release.
//!
//! This module defines the CLI structure using clap, including all subcommands
//! and their arguments. The main entry point is the [`Cli`] struct. Every
//! option can also be supplied through an environment variable so CI
//! workflows can configure the tool without long command lines.
//!
//! # Example
//!
//! ```no_run
//! use appfilter_release::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//!
//! match cli.command() {
//!     Commands::Predict { manual, .. } => {
//!         println!("Predicting next release (manual: {manual})");
//!     }
//!     _ => {}
//! }
//! ```

use std::path::{Component, Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{ReleaseError, Result};
use crate::predict::{DEFAULT_LINK_THRESHOLD, DEFAULT_NEW_THRESHOLD, DEFAULT_RELEASE_DAY};


/// Default location of the appfilter inside an icon pack repository.
pub const DEFAULT_APPFILTER_PATH: &str = "app/assets/appfilter.xml";

/// Main command-line interface for appfilter-release.
#[derive(Parser)]
#[command(
    name = "appfilter-release",
    bin_name = "appfilter-release",
    author,
    version,
    about = "Decide whether an icon pack is ready to release and which version it gets",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all appfilter-release commands.
#[derive(Parser)]
pub struct GlobalOpts {
    /// Path inside the icon pack's Git repository
    #[arg(long, global = true, default_value = ".", env = "APPFILTER_RELEASE_REPO")]
    repo: PathBuf,

    /// Appfilter location, relative to the repository root
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_APPFILTER_PATH,
        env = "APPFILTER_RELEASE_APPFILTER"
    )]
    appfilter: PathBuf,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "APPFILTER_RELEASE_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors and the predicted version
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "APPFILTER_RELEASE_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    /// Get the absolute repository path
    pub fn get_repo_dir(&self) -> PathBuf {
        normalize_path(&self.repo)
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    pub fn appfilter(&self) -> &Path {
        &self.appfilter
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Parse command line arguments from the process environment
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    repo: Option<PathBuf>,
    appfilter: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the repository path
    pub fn repo(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo = Some(dir.into());
        self
    }

    /// Set the appfilter path (relative to the repository root)
    pub fn appfilter(mut self, path: impl Into<PathBuf>) -> Self {
        self.appfilter = Some(path.into());
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self.command.ok_or(ReleaseError::ConfigError {
            message: "Command is required".to_string(),
        })?;

        Ok(Cli {
            global_opts: GlobalOpts {
                repo: self.repo.unwrap_or_else(|| PathBuf::from(".")),
                appfilter: self
                    .appfilter
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_APPFILTER_PATH)),
                verbose: self.verbose,
                quiet: self.quiet,
            },
            command,
        })
    }
}

/// Make a path absolute and drop `.`/`..` components without touching the
/// file system.
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components: Vec<Component> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir
                if matches!(components.last(), Some(Component::Normal(_))) =>
            {
                components.pop();
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Available appfilter-release subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict the next release (recommended CI command)
    ///
    /// Compares the appfilter in the working tree with the one at the previous
    /// release, counts new and linked icons, and decides:
    /// 1. Which version the next release gets (minor when both icon thresholds
    ///    are met, patch otherwise)
    /// 2. Whether a release should be cut today
    ///
    /// Prints the version on stdout and exits with status 1 when the release
    /// is not greenlit.
    Predict {
        /// Git reference holding the previous manifest (defaults to the latest
        /// v<major>.<minor>.<patch> tag)
        #[arg(long, env = "APPFILTER_RELEASE_PREVIOUS_REF")]
        previous_ref: Option<String>,

        /// Version of the previous release (defaults to --previous-ref when it is
        /// a version, otherwise to the latest release tag)
        #[arg(long, env = "APPFILTER_RELEASE_LAST_VERSION")]
        last_version: Option<String>,

        /// Day of the month on which releases are cut
        #[arg(long, default_value_t = DEFAULT_RELEASE_DAY, env = "APPFILTER_RELEASE_DAY")]
        release_day: u32,

        /// Minimum number of linked icons for a release
        #[arg(long, default_value_t = DEFAULT_LINK_THRESHOLD, env = "APPFILTER_RELEASE_LINK_THRESHOLD")]
        link_threshold: usize,

        /// Minimum number of new icons for a release
        #[arg(long, default_value_t = DEFAULT_NEW_THRESHOLD, env = "APPFILTER_RELEASE_NEW_THRESHOLD")]
        new_threshold: usize,

        /// Release regardless of the day and icon counts
        #[arg(long, env = "APPFILTER_RELEASE_MANUAL")]
        manual: bool,

        /// Day of the month to evaluate against (defaults to today, UTC)
        #[arg(long, env = "APPFILTER_RELEASE_TODAY")]
        today: Option<u32>,

        /// Force an increment (major, minor or patch) instead of the automatic
        /// choice
        #[arg(long, env = "APPFILTER_RELEASE_INCREMENT")]
        increment: Option<String>,

        /// File to append key=value results to
        #[arg(long, env = "GITHUB_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Show which icons were added since the previous release
    ///
    /// Prints the number of new and linked icons. With -v, every added
    /// mapping is listed as well.
    Diff {
        /// Git reference holding the previous manifest (defaults to the latest
        /// v<major>.<minor>.<patch> tag)
        #[arg(long, env = "APPFILTER_RELEASE_PREVIOUS_REF")]
        previous_ref: Option<String>,
    },

    /// Bump a version by an explicit increment
    Bump {
        /// Version to bump, e.g. v2.12.0
        #[arg(value_name = "VERSION")]
        from: String,

        /// One of major, minor or patch
        increment: String,
    },
}
