//! Bump command implementation.

use crate::error::Result;
use crate::version::{Increment, Version};

/// Executes the bump command, printing the bumped version on stdout.
pub fn bump(version: &str, increment: &str) -> Result<Version> {
    let version: Version = version.parse()?;
    let increment: Increment = increment.parse()?;

    let next = version.bump(increment)?;
    println!("{next}");

    Ok(next)
}
