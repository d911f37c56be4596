//! # appfilter-release
//!
//! A CI tool that decides when an icon pack is ready to ship, and which
//! version it should carry, by comparing its appfilter manifest against the
//! previous release.
//!
//! ## Overview
//!
//! An icon pack's appfilter maps app components to drawables. Between two
//! releases, every added mapping is one of two kinds:
//!
//! - a **new icon**: the drawable did not exist at the previous release
//! - a **linked icon**: an existing drawable wired to another component
//!
//! Once both counts reach their thresholds the next release is a MINOR bump;
//! otherwise it is a PATCH. A release is greenlit on the configured day of
//! the month when both thresholds are met, or whenever an operator asks for
//! one manually.
//!
//! ## Architecture
//!
//! - [`classify`]: splits additions into new and linked icons
//! - [`predict`]: picks the next version and runs the release gate
//! - [`version`]: `v<major>.<minor>.<patch>` parsing and bumping
//! - [`mapping`]: icon mappings and snapshots
//! - [`appfilter`]: extracts `<item>` records from an appfilter document
//! - [`manifest`]: reads the appfilter from the working tree and from git
//! - [`cli`] and [`commands`]: the command-line front end
//! - [`error`]: error types with thiserror + miette
//!
//! ## Usage in CI
//!
//! ```bash
//! # Compare against the latest v*.*.* tag, print the next version, and exit
//! # non-zero unless a release should be cut today.
//! appfilter-release predict
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use appfilter_release::classify::classify;
//! use appfilter_release::mapping::{IconMapping, Snapshot};
//! use appfilter_release::predict::{ThresholdConfig, is_greenlight, predict_next_version};
//!
//! let previous: Snapshot = [IconMapping::new("A", "d1")].into_iter().collect();
//! let current: Snapshot = [IconMapping::new("A", "d1"), IconMapping::new("B", "d1")]
//!     .into_iter()
//!     .collect();
//!
//! let result = classify(&current, &previous);
//! assert_eq!(result.linked_count(), 1);
//!
//! let config = ThresholdConfig::default();
//! let next = predict_next_version(&result, "v2.12.0", &config)?;
//! assert_eq!(next.to_string(), "v2.12.1");
//! assert!(!is_greenlight(&result, false, &config, 1));
//! # Ok::<(), appfilter_release::error::ReleaseError>(())
//! ```

pub mod appfilter;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod error;
pub mod manifest;
pub mod mapping;
pub mod output;
pub mod predict;
pub mod version;

// Internal modules
mod logging;
