//! Release gating and next-version prediction.
//!
//! Both decisions are pure functions of a [`ClassificationResult`], a
//! [`ThresholdConfig`] and, for gating, the current day of the month.
//!
//! - [`predict_next_version`] earns a MINOR bump only when *both* the new-icon
//!   and linked-icon thresholds are met; failing either one yields a PATCH.
//!   MAJOR bumps are never chosen automatically.
//! - [`evaluate_greenlight`] decides whether a release should be cut this run
//!   and reports the first check that held it back.

use std::fmt;

use crate::classify::ClassificationResult;
use crate::error::{ReleaseError, Result};
use crate::version::{Increment, Version};

#[cfg(test)]
mod tests;

pub const DEFAULT_RELEASE_DAY: u32 = 1;
pub const DEFAULT_LINK_THRESHOLD: usize = 20;
pub const DEFAULT_NEW_THRESHOLD: usize = 100;

/// Thresholds controlling when and how a release is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Day of the month on which automatic releases happen (1-31)
    release_day: u32,
    /// Minimum number of linked icons
    link_threshold: usize,
    /// Minimum number of new icons
    new_threshold: usize,
}

impl ThresholdConfig {
    /// Creates a new builder for [`ThresholdConfig`]
    pub fn builder() -> ThresholdConfigBuilder {
        ThresholdConfigBuilder::default()
    }

    pub fn release_day(&self) -> u32 {
        self.release_day
    }

    pub fn link_threshold(&self) -> usize {
        self.link_threshold
    }

    pub fn new_threshold(&self) -> usize {
        self.new_threshold
    }

    /// Returns `true` when both the new and linked icon counts meet their
    /// thresholds.
    pub fn thresholds_met(&self, result: &ClassificationResult) -> bool {
        result.new_count() >= self.new_threshold && result.linked_count() >= self.link_threshold
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            release_day: DEFAULT_RELEASE_DAY,
            link_threshold: DEFAULT_LINK_THRESHOLD,
            new_threshold: DEFAULT_NEW_THRESHOLD,
        }
    }
}

/// Builder for [`ThresholdConfig`]
#[derive(Debug, Default)]
pub struct ThresholdConfigBuilder {
    release_day: Option<u32>,
    link_threshold: Option<usize>,
    new_threshold: Option<usize>,
}

impl ThresholdConfigBuilder {
    pub fn release_day(mut self, day: u32) -> Self {
        self.release_day = Some(day);
        self
    }

    pub fn link_threshold(mut self, threshold: usize) -> Self {
        self.link_threshold = Some(threshold);
        self
    }

    pub fn new_threshold(mut self, threshold: usize) -> Self {
        self.new_threshold = Some(threshold);
        self
    }

    /// Build the config, rejecting release days outside 1-31.
    pub fn build(self) -> Result<ThresholdConfig> {
        let release_day = self.release_day.unwrap_or(DEFAULT_RELEASE_DAY);
        if !(1..=31).contains(&release_day) {
            return Err(ReleaseError::ConfigError {
                message: format!("release day must be between 1 and 31, got {release_day}"),
            });
        }

        Ok(ThresholdConfig {
            release_day,
            link_threshold: self.link_threshold.unwrap_or(DEFAULT_LINK_THRESHOLD),
            new_threshold: self.new_threshold.unwrap_or(DEFAULT_NEW_THRESHOLD),
        })
    }
}

/// Picks the increment the automatic rule would apply.
pub fn select_increment(result: &ClassificationResult, config: &ThresholdConfig) -> Increment {
    if config.thresholds_met(result) {
        Increment::Minor
    } else {
        Increment::Patch
    }
}

/// Predicts the version that follows `last_version`.
///
/// `last_version` must match `v<major>.<minor>.<patch>` exactly.
pub fn predict_next_version(
    result: &ClassificationResult,
    last_version: &str,
    config: &ThresholdConfig,
) -> Result<Version> {
    let last: Version = last_version.parse()?;
    last.bump(select_increment(result, config))
}

/// Outcome of the release gate, with the reason when a release is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greenlight {
    /// Released on operator request; no checks were run
    Manual,
    /// Every automatic check passed
    Approved,
    WrongDay { today: u32, release_day: u32 },
    NotEnoughNewIcons { count: usize, threshold: usize },
    NotEnoughLinkedIcons { count: usize, threshold: usize },
}

impl Greenlight {
    pub fn is_go(&self) -> bool {
        matches!(self, Self::Manual | Self::Approved)
    }
}

impl fmt::Display for Greenlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual release requested"),
            Self::Approved => write!(f, "all release checks passed"),
            Self::WrongDay { today, release_day } => {
                write!(f, "today is day {today}, releases happen on day {release_day}")
            }
            Self::NotEnoughNewIcons { count, threshold } => {
                write!(f, "{count} new icon(s), need at least {threshold}")
            }
            Self::NotEnoughLinkedIcons { count, threshold } => {
                write!(f, "{count} linked icon(s), need at least {threshold}")
            }
        }
    }
}

/// Runs the release gate checks in order and returns the first failure.
pub fn evaluate_greenlight(
    result: &ClassificationResult,
    manual_override: bool,
    config: &ThresholdConfig,
    today: u32,
) -> Greenlight {
    if manual_override {
        return Greenlight::Manual;
    }

    if today != config.release_day {
        return Greenlight::WrongDay {
            today,
            release_day: config.release_day,
        };
    }

    if result.new_count() < config.new_threshold {
        return Greenlight::NotEnoughNewIcons {
            count: result.new_count(),
            threshold: config.new_threshold,
        };
    }

    if result.linked_count() < config.link_threshold {
        return Greenlight::NotEnoughLinkedIcons {
            count: result.linked_count(),
            threshold: config.link_threshold,
        };
    }

    Greenlight::Approved
}

/// Whether a release should be cut this run.
pub fn is_greenlight(
    result: &ClassificationResult,
    manual_override: bool,
    config: &ThresholdConfig,
    today: u32,
) -> bool {
    evaluate_greenlight(result, manual_override, config, today).is_go()
}
