//! Release versions of the form `v<major>.<minor>.<patch>`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ReleaseError, Result};

/// A release version.
///
/// Parsed strictly from `v<major>.<minor>.<patch>`; no prerelease or build
/// metadata, no surrounding whitespace. Ordering is numeric, field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

fn version_regex() -> &'static Regex {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    VERSION_RE.get_or_init(|| {
        Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("version regex should compile")
    })
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns the successor of this version for the given increment.
    ///
    /// Fails with [`ReleaseError::VersionOverflow`] when the incremented
    /// component is already `u64::MAX`.
    pub fn bump(&self, increment: Increment) -> Result<Self> {
        let next = match increment {
            Increment::Major => self.major.checked_add(1).map(|major| Self::new(major, 0, 0)),
            Increment::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| Self::new(self.major, minor, 0)),
            Increment::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| Self::new(self.major, self.minor, patch)),
        };

        next.ok_or_else(|| ReleaseError::VersionOverflow {
            version: self.to_string(),
            increment: increment.to_string(),
        })
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || ReleaseError::InvalidVersionFormat {
            value: value.to_string(),
        };

        let captures = version_regex().captures(value).ok_or_else(invalid)?;
        let field = |index: usize| captures[index].parse::<u64>().map_err(|_| invalid());

        Ok(Self::new(field(1)?, field(2)?, field(3)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of a [`Version`] to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    Major,
    Minor,
    Patch,
}

impl FromStr for Increment {
    type Err = ReleaseError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(ReleaseError::InvalidIncrementType {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        })
    }
}
