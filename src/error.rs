//! Error types for appfilter-release.
//!
//! This module defines all error types used throughout appfilter-release,
//! using a combination of `thiserror` for ergonomic error definitions and
//! `miette` for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`ReleaseError`]
//! - Each variant includes a helpful message and a diagnostic code
//! - The offending value is carried in the variant so CI logs show what broke
//! - Errors are converted to `miette::Result` at the binary boundary
//!
//! Nothing here is retried. The classifier and predictor are pure, so an
//! error always means the inputs for this run are unusable.
//!
//! # Example
//!
//! ```
//! use appfilter_release::error::{ReleaseError, Result};
//! use appfilter_release::version::Version;
//!
//! fn last_release(tag: &str) -> Result<Version> {
//!     tag.parse()
//! }
//!
//! let err = last_release("2.12.0").unwrap_err();
//! assert!(matches!(err, ReleaseError::InvalidVersionFormat { .. }));
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in appfilter-release operations
#[derive(Error, Debug, Diagnostic)]
pub enum ReleaseError {
    /// An appfilter record is missing its component or drawable attribute.
    ///
    /// Such a record cannot be compared against other mappings, so the whole
    /// classification for the run is aborted.
    #[error("Malformed appfilter record at line {line}: missing '{field}' attribute")]
    #[diagnostic(
        code(appfilter_release::classify::malformed_record),
        help("Every <item> in the appfilter needs both a component and a drawable attribute.")
    )]
    MalformedRecord {
        /// 1-based line of the `<item>` element in the manifest
        line: usize,
        /// Name of the missing attribute
        field: &'static str,
        /// The raw element text as it appeared in the manifest
        record: String,
    },

    /// The last release version does not look like `v<major>.<minor>.<patch>`.
    #[error("Invalid version format: '{value}'")]
    #[diagnostic(
        code(appfilter_release::version::invalid_format),
        help("Versions must match exactly 'v<major>.<minor>.<patch>', for example 'v2.12.0'.")
    )]
    InvalidVersionFormat {
        /// The rejected version string
        value: String,
    },

    /// An explicit increment other than major, minor or patch was requested.
    #[error("Invalid increment type: '{value}'")]
    #[diagnostic(
        code(appfilter_release::version::invalid_increment),
        help("Use one of 'major', 'minor' or 'patch'.")
    )]
    InvalidIncrementType {
        /// The rejected increment literal
        value: String,
    },

    /// Bumping the version would overflow one of its components.
    #[error("Cannot apply a {increment} increment to {version}: component overflows")]
    #[diagnostic(
        code(appfilter_release::version::overflow),
        help("Pass a smaller --last-version or start a new release line.")
    )]
    VersionOverflow {
        /// The version that was being bumped
        version: String,
        /// The requested increment
        increment: String,
    },

    /// Git repository not found in the given directory or any parent.
    #[error("Git repository not found in '{path}' or any parent directories")]
    #[diagnostic(
        code(appfilter_release::git::repo_not_found),
        help("Run appfilter-release from within the icon pack's Git repository.")
    )]
    RepoNotFound {
        /// The path where the Git repository was searched for
        path: PathBuf,
    },

    /// Any other libgit2 failure while reading tags, trees or blobs.
    #[error("Git operation failed")]
    #[diagnostic(code(appfilter_release::git::error))]
    Git(#[from] git2::Error),

    /// A git reference given for the previous manifest could not be resolved.
    #[error("Could not resolve git reference '{reference}'")]
    #[diagnostic(
        code(appfilter_release::git::revision_not_found),
        help("Make sure the tag or branch exists locally (CI checkouts may need 'fetch-depth: 0').")
    )]
    RevisionNotFound {
        /// The reference that failed to resolve
        reference: String,
    },

    /// No `v<major>.<minor>.<patch>` tag exists to compare against.
    #[error("No release tag matching 'v<major>.<minor>.<patch>' was found")]
    #[diagnostic(
        code(appfilter_release::git::no_release_tag),
        help("Pass --previous-ref and --last-version explicitly, or push an initial release tag.")
    )]
    NoReleaseTag,

    /// The appfilter manifest is missing from the working tree.
    #[error("Appfilter manifest not found at '{path}'")]
    #[diagnostic(
        code(appfilter_release::manifest::not_found),
        help("Point --appfilter at the manifest, relative to the repository root.")
    )]
    ManifestNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The manifest stored at a git reference is not valid UTF-8.
    #[error("Appfilter manifest '{path}' at '{reference}' is not valid UTF-8")]
    #[diagnostic(
        code(appfilter_release::manifest::invalid_utf8),
        help("Re-encode the appfilter as UTF-8 or compare against a different reference.")
    )]
    ManifestEncoding {
        /// The reference the manifest was read at
        reference: String,
        /// The manifest path inside the repository
        path: PathBuf,
        /// The underlying decoding error
        #[source]
        source: std::str::Utf8Error,
    },

    /// File system I/O error while reading the manifest or writing outputs.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(appfilter_release::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid thresholds or command configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(appfilter_release::config::error),
        help("Check the release day and threshold settings.")
    )]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ReleaseError>;
