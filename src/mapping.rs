//! Icon mappings and snapshots of an appfilter at one point in history.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::appfilter::AppfilterItem;
use crate::error::{ReleaseError, Result};

/// A single `component -> drawable` mapping from the appfilter.
///
/// Identity is the `(component, drawable)` pair. The display `name` is kept
/// for reporting only and takes no part in equality or hashing, so the same
/// mapping with two different labels is still one entry in a [`Snapshot`].
#[derive(Debug, Clone, Eq)]
pub struct IconMapping {
    component: String,
    drawable: String,
    name: Option<String>,
}

impl IconMapping {
    pub fn new(component: impl Into<String>, drawable: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            drawable: drawable.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn drawable(&self) -> &str {
        &self.drawable
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for IconMapping {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component && self.drawable == other.drawable
    }
}

impl Hash for IconMapping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.component.hash(state);
        self.drawable.hash(state);
    }
}

impl TryFrom<&AppfilterItem> for IconMapping {
    type Error = ReleaseError;

    fn try_from(item: &AppfilterItem) -> Result<Self> {
        let malformed = |field| ReleaseError::MalformedRecord {
            line: item.line,
            field,
            record: item.raw.clone(),
        };

        let component = item.component.as_deref().ok_or_else(|| malformed("component"))?;
        let drawable = item.drawable.as_deref().ok_or_else(|| malformed("drawable"))?;

        let mapping = IconMapping::new(component, drawable);
        Ok(match item.name.as_deref() {
            Some(name) => mapping.with_name(name),
            None => mapping,
        })
    }
}

/// The set of mappings in an appfilter at one point in history.
///
/// Duplicate pairs collapse into a single entry; the first occurrence keeps
/// its display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    mappings: HashSet<IconMapping>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from parsed appfilter items.
    ///
    /// Fails on the first item that lacks a component or drawable.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a AppfilterItem>) -> Result<Self> {
        let mut snapshot = Self::new();
        for item in items {
            snapshot.insert(IconMapping::try_from(item)?);
        }
        Ok(snapshot)
    }

    /// Inserts a mapping, returning `false` if the pair was already present.
    pub fn insert(&mut self, mapping: IconMapping) -> bool {
        self.mappings.insert(mapping)
    }

    pub fn contains(&self, mapping: &IconMapping) -> bool {
        self.mappings.contains(mapping)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconMapping> {
        self.mappings.iter()
    }

    /// Distinct drawables referenced by this snapshot, ignoring components.
    pub fn drawables(&self) -> HashSet<&str> {
        self.mappings.iter().map(IconMapping::drawable).collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromIterator<IconMapping> for Snapshot {
    fn from_iter<I: IntoIterator<Item = IconMapping>>(iter: I) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(line: usize, component: Option<&str>, drawable: Option<&str>) -> AppfilterItem {
        AppfilterItem {
            line,
            component: component.map(str::to_string),
            drawable: drawable.map(str::to_string),
            name: None,
            raw: "<item />".to_string(),
        }
    }

    #[test]
    fn test_name_does_not_affect_identity() {
        let plain = IconMapping::new("ComponentInfo{com.a/com.a.Main}", "a");
        let named = IconMapping::new("ComponentInfo{com.a/com.a.Main}", "a").with_name("A");
        assert_eq!(plain, named);

        let snapshot: Snapshot = [plain, named].into_iter().collect();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_from_items_rejects_missing_drawable() {
        let items = [
            item(3, Some("ComponentInfo{com.a/com.a.Main}"), Some("a")),
            item(4, Some("ComponentInfo{com.b/com.b.Main}"), None),
        ];

        let err = Snapshot::from_items(&items).unwrap_err();
        match err {
            ReleaseError::MalformedRecord { line, field, .. } => {
                assert_eq!(line, 4);
                assert_eq!(field, "drawable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_items_rejects_missing_component() {
        let items = [item(7, None, Some("a"))];
        let err = Snapshot::from_items(&items).unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::MalformedRecord {
                field: "component",
                ..
            }
        ));
    }

    #[test]
    fn test_drawables_projection() {
        let snapshot: Snapshot = [
            IconMapping::new("A", "d1"),
            IconMapping::new("B", "d1"),
            IconMapping::new("C", "d2"),
        ]
        .into_iter()
        .collect();

        let drawables = snapshot.drawables();
        assert_eq!(drawables.len(), 2);
        assert!(drawables.contains("d1"));
        assert!(drawables.contains("d2"));
    }
}
