//! core::well_set
//!
//! The uniquely-keyed, row-major ordered container of wells.
//!
//! # Invariants
//!
//! - At most one well per [`SpatialKey`]
//! - Iteration is always in key order
//! - [`WellSet::add`] never overwrites; [`WellSet::replace`] is the only
//!   operation that changes an existing well's payload
//!
//! # Snapshots and borrows
//!
//! Single-well lookups (`get`, `first`, `ceiling`, ...) borrow from the set.
//! Everything that returns a `WellSet` or a `Vec<Well<V>>` (`get_all`,
//! `row`, `head_set`, `to_vec`, ...) returns an independent deep copy, so
//! later edits to either side are never visible in the other.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use serde::{Serialize, Serializer};

use super::error::{PlateError, Result};
use super::input::{KeySource, WellSource};
use super::key::SpatialKey;
use super::key_list::KeyList;
use super::well::Well;

/// An ordered set of wells with at most one well per key.
///
/// # Example
///
/// ```
/// use microplate::core::input::Delimited;
/// use microplate::core::key::SpatialKey;
/// use microplate::core::well::Well;
/// use microplate::core::well_set::WellSet;
///
/// let mut set: WellSet<i32> = WellSet::new("assay");
/// set.add(Well::with_values(SpatialKey::parse("B1").unwrap(), vec![7])).unwrap();
/// set.add(Delimited::new("A1,A2", ",")).unwrap();
///
/// let order: Vec<String> = set.iter().map(|w| w.index()).collect();
/// assert_eq!(order, ["A1", "A2", "B1"]);
/// assert!(set.contains("B1").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "V: Serialize"))]
pub struct WellSet<V> {
    label: String,
    #[serde(serialize_with = "wells_as_seq")]
    wells: BTreeMap<SpatialKey, Well<V>>,
}

fn wells_as_seq<S, V>(
    wells: &BTreeMap<SpatialKey, Well<V>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_seq(wells.values())
}

impl<V> Default for WellSet<V> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<V> WellSet<V> {
    /// Create an empty well set.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            wells: BTreeMap::new(),
        }
    }

    /// Build a set from a batch of wells.
    ///
    /// Unlike [`WellSet::add`], construction resolves duplicate keys by
    /// last-write-wins.
    pub fn from_wells(label: impl Into<String>, wells: impl IntoIterator<Item = Well<V>>) -> Self {
        let mut set = Self::new(label);
        for well in wells {
            set.wells.insert(well.key(), well);
        }
        set
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn clear(&mut self) {
        self.wells.clear();
    }

    /// Wells in key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Well<V>> + ExactSizeIterator + '_ {
        self.wells.values()
    }

    /// Wells in descending key order.
    pub fn iter_rev(&self) -> impl Iterator<Item = &Well<V>> + '_ {
        self.wells.values().rev()
    }

    /// Mutable access to payloads, in key order. Keys cannot be changed.
    pub fn wells_mut(&mut self) -> impl Iterator<Item = &mut Well<V>> + '_ {
        self.wells.values_mut()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = SpatialKey> + '_ {
        self.wells.keys().copied()
    }

    pub fn contains_key(&self, key: &SpatialKey) -> bool {
        self.wells.contains_key(key)
    }

    /// Borrow the well at `key`. A miss is `None`, never an error.
    pub fn get(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells.get(key)
    }

    pub fn get_mut(&mut self, key: &SpatialKey) -> Option<&mut Well<V>> {
        self.wells.get_mut(key)
    }

    /// Insert wells whose keys are absent. Wells whose key is already
    /// present are dropped, and so are later duplicates within `input`.
    ///
    /// Returns how many wells were inserted.
    ///
    /// # Errors
    ///
    /// Fails only if a string input does not parse; nothing is inserted then.
    pub fn add(&mut self, input: impl WellSource<V>) -> Result<usize> {
        let wells = input.into_wells()?;
        let offered = wells.len();
        let mut added = 0;
        for well in wells {
            if let Entry::Vacant(slot) = self.wells.entry(well.key()) {
                slot.insert(well);
                added += 1;
            }
        }
        tracing::debug!(label = %self.label, offered, added, "add wells");
        Ok(added)
    }

    /// Remove wells by key. Keys that are not present are ignored.
    ///
    /// Returns how many wells were removed.
    pub fn remove(&mut self, input: impl KeySource) -> Result<usize> {
        let keys = input.into_keys()?;
        let removed = keys
            .iter()
            .filter(|key| self.wells.remove(*key).is_some())
            .count();
        tracing::debug!(label = %self.label, removed, "remove wells");
        Ok(removed)
    }

    /// Remove and return the well at `key`.
    pub fn remove_key(&mut self, key: &SpatialKey) -> Option<Well<V>> {
        self.wells.remove(key)
    }

    /// Keep only wells whose key is in `input`. An empty input empties the
    /// set.
    ///
    /// Returns how many wells were removed.
    pub fn retain(&mut self, input: impl KeySource) -> Result<usize> {
        let keep: BTreeSet<SpatialKey> = input.into_keys()?.into_iter().collect();
        let before = self.wells.len();
        self.wells.retain(|key, _| keep.contains(key));
        let removed = before - self.wells.len();
        tracing::debug!(label = %self.label, removed, "retain wells");
        Ok(removed)
    }

    /// Overwrite the payload of wells whose key already exists, in place;
    /// insert the rest as [`WellSet::add`] would.
    pub fn replace(&mut self, input: impl WellSource<V>) -> Result<()> {
        let wells = input.into_wells()?;
        let mut replaced = 0usize;
        for well in wells {
            let key = well.key();
            match self.wells.get_mut(&key) {
                Some(existing) => {
                    existing.replace_values(well.into_values());
                    replaced += 1;
                }
                None => {
                    self.wells.insert(key, well);
                }
            }
        }
        tracing::debug!(label = %self.label, replaced, "replace wells");
        Ok(())
    }

    /// True if every key in `input` is present. Payload is ignored.
    pub fn contains(&self, input: impl KeySource) -> Result<bool> {
        Ok(input
            .into_keys()?
            .iter()
            .all(|key| self.wells.contains_key(key)))
    }

    /// The first well in key order.
    ///
    /// # Errors
    ///
    /// `PlateError::EmptyCollection` if the set is empty.
    pub fn first(&self) -> Result<&Well<V>> {
        self.wells
            .values()
            .next()
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    /// The last well in key order.
    ///
    /// # Errors
    ///
    /// `PlateError::EmptyCollection` if the set is empty.
    pub fn last(&self) -> Result<&Well<V>> {
        self.wells
            .values()
            .next_back()
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    /// Remove and return the first well.
    pub fn pop_first(&mut self) -> Result<Well<V>> {
        self.wells
            .pop_first()
            .map(|(_, well)| well)
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    /// Remove and return the last well.
    pub fn pop_last(&mut self) -> Result<Well<V>> {
        self.wells
            .pop_last()
            .map(|(_, well)| well)
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    /// The least well with key `>= key`.
    pub fn ceiling(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells.range(key..).next().map(|(_, w)| w)
    }

    /// The greatest well with key `<= key`.
    pub fn floor(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells.range(..=key).next_back().map(|(_, w)| w)
    }

    /// The least well with key `> key`.
    pub fn higher(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(_, w)| w)
    }

    /// The greatest well with key `< key`.
    pub fn lower(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells.range(..key).next_back().map(|(_, w)| w)
    }

    /// Borrowing iterator over a key range. Inverted or empty ranges yield
    /// nothing instead of panicking.
    fn range_iter(
        &self,
        lo: Bound<&SpatialKey>,
        hi: Bound<&SpatialKey>,
    ) -> Box<dyn Iterator<Item = &Well<V>> + '_> {
        if range_is_empty(lo, hi) {
            return Box::new(std::iter::empty());
        }
        Box::new(self.wells.range((lo, hi)).map(|(_, w)| w))
    }
}

impl<V: Clone> WellSet<V> {
    fn collect_from<'a>(&self, wells: impl Iterator<Item = &'a Well<V>>) -> WellSet<V>
    where
        V: 'a,
    {
        WellSet::from_wells(self.label.clone(), wells.cloned())
    }

    /// Copy out the wells at the keys in `input`.
    ///
    /// Returns `None` if none of the keys are present; otherwise a set of
    /// the keys that were found, even if some were missing.
    pub fn get_all(&self, input: impl KeySource) -> Result<Option<WellSet<V>>> {
        let keys = input.into_keys()?;
        let found = self.collect_from(keys.iter().filter_map(|key| self.wells.get(key)));
        Ok((!found.is_empty()).then_some(found))
    }

    /// Wells in row `row`.
    pub fn row(&self, row: u32) -> WellSet<V> {
        self.collect_from(self.iter().filter(|w| w.row() == row))
    }

    /// Wells in column `column`.
    pub fn column(&self, column: u32) -> WellSet<V> {
        self.collect_from(self.iter().filter(|w| w.column() == column))
    }

    /// Wells below `key`, including it when `inclusive`.
    pub fn head_set(&self, key: &SpatialKey, inclusive: bool) -> WellSet<V> {
        let hi = if inclusive {
            Bound::Included(key)
        } else {
            Bound::Excluded(key)
        };
        self.collect_from(self.range_iter(Bound::Unbounded, hi))
    }

    /// Wells above `key`, including it when `inclusive`.
    pub fn tail_set(&self, key: &SpatialKey, inclusive: bool) -> WellSet<V> {
        let lo = if inclusive {
            Bound::Included(key)
        } else {
            Bound::Excluded(key)
        };
        self.collect_from(self.range_iter(lo, Bound::Unbounded))
    }

    /// Wells between `lo` and `hi`. If `lo > hi` the result is empty.
    pub fn sub_set(
        &self,
        lo: &SpatialKey,
        lo_inclusive: bool,
        hi: &SpatialKey,
        hi_inclusive: bool,
    ) -> WellSet<V> {
        let lo = if lo_inclusive {
            Bound::Included(lo)
        } else {
            Bound::Excluded(lo)
        };
        let hi = if hi_inclusive {
            Bound::Included(hi)
        } else {
            Bound::Excluded(hi)
        };
        self.collect_from(self.range_iter(lo, hi))
    }

    /// A copy of the wells in descending key order.
    ///
    /// This is a `Vec` rather than a `WellSet` because a well set always
    /// iterates in ascending key order.
    pub fn descending_set(&self) -> Vec<Well<V>> {
        self.iter_rev().cloned().collect()
    }

    /// A copy of the wells in key order.
    pub fn to_vec(&self) -> Vec<Well<V>> {
        self.iter().cloned().collect()
    }
}

impl<V> WellSet<V> {
    /// The keys of this set as a [`KeyList`] with the same label.
    pub fn to_key_list(&self) -> KeyList {
        KeyList::from_well_set(self)
    }
}

fn range_is_empty(lo: Bound<&SpatialKey>, hi: Bound<&SpatialKey>) -> bool {
    match (lo, hi) {
        (Bound::Included(a), Bound::Included(b)) => a > b,
        (Bound::Included(a), Bound::Excluded(b))
        | (Bound::Excluded(a), Bound::Included(b))
        | (Bound::Excluded(a), Bound::Excluded(b)) => a >= b,
        _ => false,
    }
}

impl<V> FromIterator<Well<V>> for WellSet<V> {
    fn from_iter<I: IntoIterator<Item = Well<V>>>(iter: I) -> Self {
        Self::from_wells("", iter)
    }
}

/// Last write wins, like `from_wells`.
impl<V> Extend<Well<V>> for WellSet<V> {
    fn extend<I: IntoIterator<Item = Well<V>>>(&mut self, iter: I) {
        self.wells
            .extend(iter.into_iter().map(|well| (well.key(), well)));
    }
}

impl<V> IntoIterator for WellSet<V> {
    type Item = Well<V>;
    type IntoIter = std::collections::btree_map::IntoValues<SpatialKey, Well<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.wells.into_values()
    }
}

impl<'a, V> IntoIterator for &'a WellSet<V> {
    type Item = &'a Well<V>;
    type IntoIter = std::collections::btree_map::Values<'a, SpatialKey, Well<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.wells.values()
    }
}

/// Integer well set.
pub type WellSetInteger = WellSet<i32>;
/// Floating-point well set.
pub type WellSetDouble = WellSet<f64>;
/// Exact decimal well set.
pub type WellSetDecimal = WellSet<rust_decimal::Decimal>;
/// Wide integer well set.
pub type WellSetBigInteger = WellSet<i128>;
