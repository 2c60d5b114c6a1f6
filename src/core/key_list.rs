//! core::key_list
//!
//! A labeled, ordered, duplicate-free list of keys.
//!
//! Key lists describe intended membership without carrying payload. A
//! [`WellSet`] projects to one with [`KeyList::from_well_set`], and plate
//! groups are stored as key lists.
//!
//! [`WellSet`]: super::well_set::WellSet

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::key::SpatialKey;
use super::well_set::WellSet;

/// An ordered set of [`SpatialKey`]s with a label.
///
/// # Example
///
/// ```
/// use microplate::core::key_list::KeyList;
///
/// let list = KeyList::parse("controls", "B1; A1; B1", ";").unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.to_string(), "A1,B1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
    label: String,
    keys: BTreeSet<SpatialKey>,
}

impl KeyList {
    /// Create an empty key list.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            keys: BTreeSet::new(),
        }
    }

    /// Create a key list from any keys; duplicates collapse.
    pub fn with_keys(label: impl Into<String>, keys: impl IntoIterator<Item = SpatialKey>) -> Self {
        Self {
            label: label.into(),
            keys: keys.into_iter().collect(),
        }
    }

    /// Project a well set onto its keys, keeping the set's label.
    pub fn from_well_set<V>(set: &WellSet<V>) -> Self {
        Self::with_keys(set.label(), set.keys())
    }

    /// Parse a delimiter-separated list of canonical keys.
    ///
    /// Empty tokens (e.g. from a trailing delimiter) are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first token's parse failure.
    pub fn parse(label: impl Into<String>, text: &str, delimiter: &str) -> Result<Self> {
        Ok(Self::with_keys(label, parse_delimited(text, delimiter)?))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Insert a key. Returns false if it was already listed.
    pub fn add(&mut self, key: SpatialKey) -> bool {
        self.keys.insert(key)
    }

    /// Remove a key. Returns false if it was not listed.
    pub fn remove(&mut self, key: &SpatialKey) -> bool {
        self.keys.remove(key)
    }

    pub fn contains(&self, key: &SpatialKey) -> bool {
        self.keys.contains(key)
    }

    /// Membership equality, ignoring labels.
    pub fn same_keys(&self, other: &KeyList) -> bool {
        self.keys == other.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in row-major order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SpatialKey> + '_ {
        self.keys.iter()
    }

    pub fn to_vec(&self) -> Vec<SpatialKey> {
        self.keys.iter().copied().collect()
    }
}

impl<'a> IntoIterator for &'a KeyList {
    type Item = &'a SpatialKey;
    type IntoIter = std::collections::btree_set::Iter<'a, SpatialKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl fmt::Display for KeyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for key in &self.keys {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
            first = false;
        }
        Ok(())
    }
}

/// Split `text` on `delimiter` and parse each non-empty token as a key.
pub(crate) fn parse_delimited(text: &str, delimiter: &str) -> Result<Vec<SpatialKey>> {
    if delimiter.is_empty() {
        return Err(super::error::PlateError::parse("delimiter cannot be empty"));
    }
    text.split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(SpatialKey::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlateError;
    use crate::core::well::Well;

    fn key(s: &str) -> SpatialKey {
        SpatialKey::parse(s).unwrap()
    }

    #[test]
    fn keys_are_ordered_and_unique() {
        let list = KeyList::with_keys("g", [key("C1"), key("A2"), key("A1"), key("C1")]);
        assert_eq!(list.to_vec(), vec![key("A1"), key("A2"), key("C1")]);
    }

    #[test]
    fn add_and_remove_report_change() {
        let mut list = KeyList::new("g");
        assert!(list.add(key("B3")));
        assert!(!list.add(key("B3")));
        assert!(list.remove(&key("B3")));
        assert!(!list.remove(&key("B3")));
        assert!(list.is_empty());
    }

    #[test]
    fn same_keys_ignores_label() {
        let a = KeyList::with_keys("a", [key("A1"), key("B1")]);
        let b = KeyList::with_keys("b", [key("B1"), key("A1")]);
        assert!(a.same_keys(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn from_well_set_projects_keys() {
        let set = WellSet::from_wells(
            "samples",
            vec![Well::with_values(key("B2"), vec![1]), Well::new(key("A1"))],
        );
        let list = KeyList::from_well_set(&set);
        assert_eq!(list.label(), "samples");
        assert_eq!(list.to_string(), "A1,B2");
    }

    #[test]
    fn parse_skips_empty_tokens() {
        let list = KeyList::parse("g", "A1,,B2,", ",").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn parse_rejects_bad_token() {
        assert!(matches!(
            KeyList::parse("g", "A1,B?", ","),
            Err(PlateError::Parse(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_delimiter() {
        assert!(KeyList::parse("g", "A1", "").is_err());
    }
}
