//! Change classification between two appfilter snapshots.
//!
//! Every mapping present now but not at the previous release is either:
//!
//! - **new**: its drawable did not exist anywhere in the previous snapshot,
//!   i.e. genuinely new artwork, or
//! - **linked**: its drawable already existed under some other component and
//!   has now been wired to an additional one.
//!
//! A mapping that moved to a different component but kept its drawable is
//! therefore linked, never new. Placeholder artwork reused for an unrelated
//! app is also counted as linked; there is no way to tell the two apart from
//! the manifest alone.

use std::collections::HashSet;

use crate::appfilter::AppfilterItem;
use crate::error::Result;
use crate::mapping::{IconMapping, Snapshot};


/// The additions between two snapshots, split by whether the artwork is new.
///
/// The two sets are disjoint and together make up `current - previous`.
/// Iteration order is unspecified; use [`sorted`](Self::sorted_new_icons)
/// accessors for stable reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub new_icons: HashSet<IconMapping>,
    pub linked_icons: HashSet<IconMapping>,
}

impl ClassificationResult {
    pub fn new_count(&self) -> usize {
        self.new_icons.len()
    }

    pub fn linked_count(&self) -> usize {
        self.linked_icons.len()
    }

    /// Returns `true` if nothing was added since the previous snapshot.
    pub fn is_empty(&self) -> bool {
        self.new_icons.is_empty() && self.linked_icons.is_empty()
    }

    pub fn sorted_new_icons(&self) -> Vec<&IconMapping> {
        sorted(&self.new_icons)
    }

    pub fn sorted_linked_icons(&self) -> Vec<&IconMapping> {
        sorted(&self.linked_icons)
    }
}

fn sorted(set: &HashSet<IconMapping>) -> Vec<&IconMapping> {
    let mut mappings: Vec<&IconMapping> = set.iter().collect();
    mappings.sort_by(|a, b| {
        (a.drawable(), a.component()).cmp(&(b.drawable(), b.component()))
    });
    mappings
}

/// Classifies the mappings added between `previous` and `current`.
///
/// Removed mappings are not reported.
pub fn classify(current: &Snapshot, previous: &Snapshot) -> ClassificationResult {
    let previous_drawables = previous.drawables();
    let mut result = ClassificationResult::default();

    for mapping in current.iter().filter(|m| !previous.contains(m)) {
        if previous_drawables.contains(mapping.drawable()) {
            result.linked_icons.insert(mapping.clone());
        } else {
            result.new_icons.insert(mapping.clone());
        }
    }

    result
}

/// Classifies raw appfilter records.
///
/// Fails with [`MalformedRecord`](crate::error::ReleaseError::MalformedRecord)
/// if any record in either list lacks a component or drawable.
pub fn classify_records(
    current: &[AppfilterItem],
    previous: &[AppfilterItem],
) -> Result<ClassificationResult> {
    let current = Snapshot::from_items(current)?;
    let previous = Snapshot::from_items(previous)?;
    Ok(classify(&current, &previous))
}
