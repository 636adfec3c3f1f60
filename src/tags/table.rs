//! The tag table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::TagValue;

/// Mapping from tag name to current value.
///
/// Insertion order is preserved so tag browsers list tags in the order they
/// were created. Reads of absent tags never fail: they coerce to `false`
/// or `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagTable {
    values: IndexMap<String, TagValue>,
}

impl TagTable {
    /// Create an empty tag table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag table a fresh session starts with.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.set("I0.1", false);
        table.set("I0.2", false);
        table.set("Q0.1", false);
        table.set("T1", 0);
        table
    }

    /// Get a tag's value.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.values.get(name)
    }

    /// Boolean view of a tag; absent tags read as `false`.
    pub fn truthy(&self, name: &str) -> bool {
        self.values.get(name).map(TagValue::is_truthy).unwrap_or(false)
    }

    /// Numeric view of a tag; absent tags read as `0`.
    pub fn number(&self, name: &str) -> f64 {
        self.values.get(name).map(TagValue::as_number).unwrap_or(0.0)
    }

    /// Write a tag, creating it on first reference.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<TagValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Create a tag only if it does not exist yet.
    ///
    /// Returns `true` if the tag was created.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<TagValue>) -> bool {
        let name = name.into();
        if self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value.into());
        true
    }

    /// Remove a tag, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<TagValue> {
        self.values.shift_remove(name)
    }

    /// Check whether a tag exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over tags in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
