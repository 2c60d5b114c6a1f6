//! core::input
//!
//! Normalization of the many equivalent input shapes the bulk operations
//! accept.
//!
//! Every bulk operation on a [`WellSet`], [`Plate`] or [`Stack`] takes one of
//! these traits as its argument and normalizes it first, so each operation is
//! written once against a plain `Vec`.
//!
//! | Trait              | Normalizes to       | Used by                                  |
//! |--------------------|---------------------|------------------------------------------|
//! | [`KeySource`]      | `Vec<SpatialKey>`   | remove, retain, contains, get            |
//! | [`WellSource`]     | `Vec<Well<V>>`      | add, replace                             |
//! | [`LabelSource`]    | `Vec<String>`       | group removal/lookup                     |
//! | [`GroupSource`]    | `Vec<KeyList>`      | group insertion                          |
//! | [`PlateSelector`]  | `Vec<PlateQuery>`   | stack remove, retain, contains, get      |
//! | [`PlateSource`]    | `Vec<Plate<V>>`     | stack add, replace                       |
//!
//! Key-only shapes (a bare key, a [`KeyList`], a [`Delimited`] string) used
//! as a [`WellSource`] become empty wells at those coordinates.
//!
//! # Example
//!
//! ```
//! use microplate::core::input::{Delimited, KeySource};
//!
//! let keys = Delimited::new("A1 | B2", "|").into_keys().unwrap();
//! assert_eq!(keys.len(), 2);
//! ```

use super::error::Result;
use super::key::SpatialKey;
use super::key_list::{parse_delimited, KeyList};
use super::plate::{Plate, PlateId};
use super::stack::Stack;
use super::well::Well;
use super::well_set::WellSet;

/// A delimiter-separated string of canonical keys, e.g. `"A1,A2,B7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimited<'a> {
    text: &'a str,
    delimiter: &'a str,
}

impl<'a> Delimited<'a> {
    pub fn new(text: &'a str, delimiter: &'a str) -> Self {
        Self { text, delimiter }
    }

    /// Parse every token. Fails on the first malformed one.
    pub fn keys(&self) -> Result<Vec<SpatialKey>> {
        parse_delimited(self.text, self.delimiter)
    }
}

/// Anything that can be reduced to a sequence of keys.
pub trait KeySource {
    /// # Errors
    ///
    /// Only string shapes can fail, with `PlateError::Parse`.
    fn into_keys(self) -> Result<Vec<SpatialKey>>;
}

impl KeySource for SpatialKey {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(vec![self])
    }
}

impl KeySource for &SpatialKey {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(vec![*self])
    }
}

/// A single canonical key string.
impl KeySource for &str {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(vec![SpatialKey::parse(self)?])
    }
}

impl KeySource for Delimited<'_> {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        self.keys()
    }
}

impl KeySource for Vec<SpatialKey> {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self)
    }
}

impl KeySource for &[SpatialKey] {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> KeySource for [SpatialKey; N] {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.to_vec())
    }
}

impl KeySource for KeyList {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.to_vec())
    }
}

impl KeySource for &KeyList {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.to_vec())
    }
}

impl<V> KeySource for &Well<V> {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(vec![self.key()])
    }
}

impl<V> KeySource for &[Well<V>] {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.iter().map(Well::key).collect())
    }
}

impl<V> KeySource for &Vec<Well<V>> {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        self.as_slice().into_keys()
    }
}

impl<V> KeySource for &WellSet<V> {
    fn into_keys(self) -> Result<Vec<SpatialKey>> {
        Ok(self.keys().collect())
    }
}

/// Anything that can be reduced to a sequence of wells.
pub trait WellSource<V> {
    /// # Errors
    ///
    /// Only string shapes can fail, with `PlateError::Parse`.
    fn into_wells(self) -> Result<Vec<Well<V>>>;
}

impl<V> WellSource<V> for Well<V> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(vec![self])
    }
}

impl<V: Clone> WellSource<V> for &Well<V> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(vec![self.clone()])
    }
}

impl<V> WellSource<V> for Vec<Well<V>> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self)
    }
}

impl<V: Clone> WellSource<V> for &[Well<V>] {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.to_vec())
    }
}

impl<V, const N: usize> WellSource<V> for [Well<V>; N] {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.into_iter().collect())
    }
}

impl<V> WellSource<V> for WellSet<V> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.into_iter().collect())
    }
}

impl<V: Clone> WellSource<V> for &WellSet<V> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.to_vec())
    }
}

impl<V> WellSource<V> for SpatialKey {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(vec![Well::new(self)])
    }
}

impl<V> WellSource<V> for &str {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(vec![Well::parse(self)?])
    }
}

impl<V> WellSource<V> for Delimited<'_> {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.keys()?.into_iter().map(Well::new).collect())
    }
}

impl<V> WellSource<V> for &KeyList {
    fn into_wells(self) -> Result<Vec<Well<V>>> {
        Ok(self.iter().copied().map(Well::new).collect())
    }
}

/// Anything that names one or more labels.
pub trait LabelSource {
    fn into_labels(self) -> Vec<String>;
}

impl LabelSource for &str {
    fn into_labels(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl LabelSource for String {
    fn into_labels(self) -> Vec<String> {
        vec![self]
    }
}

impl LabelSource for &String {
    fn into_labels(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl LabelSource for Vec<String> {
    fn into_labels(self) -> Vec<String> {
        self
    }
}

impl LabelSource for Vec<&str> {
    fn into_labels(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl LabelSource for &[&str] {
    fn into_labels(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl LabelSource for &[String] {
    fn into_labels(self) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> LabelSource for [&str; N] {
    fn into_labels(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl LabelSource for &KeyList {
    fn into_labels(self) -> Vec<String> {
        vec![self.label().to_string()]
    }
}

impl LabelSource for &[KeyList] {
    fn into_labels(self) -> Vec<String> {
        self.iter().map(|list| list.label().to_string()).collect()
    }
}

/// Anything that can be reduced to group definitions.
pub trait GroupSource {
    fn into_groups(self) -> Vec<KeyList>;
}

impl GroupSource for KeyList {
    fn into_groups(self) -> Vec<KeyList> {
        vec![self]
    }
}

impl GroupSource for &KeyList {
    fn into_groups(self) -> Vec<KeyList> {
        vec![self.clone()]
    }
}

impl GroupSource for Vec<KeyList> {
    fn into_groups(self) -> Vec<KeyList> {
        self
    }
}

impl GroupSource for &[KeyList] {
    fn into_groups(self) -> Vec<KeyList> {
        self.to_vec()
    }
}

impl<const N: usize> GroupSource for [KeyList; N] {
    fn into_groups(self) -> Vec<KeyList> {
        self.into_iter().collect()
    }
}

/// A well set used as a group definition: its label and keys.
impl<V> GroupSource for &WellSet<V> {
    fn into_groups(self) -> Vec<KeyList> {
        vec![KeyList::from_well_set(self)]
    }
}

impl<V> GroupSource for &[WellSet<V>] {
    fn into_groups(self) -> Vec<KeyList> {
        self.iter().map(KeyList::from_well_set).collect()
    }
}

/// One normalized plate selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateQuery {
    /// Every plate with this label, whatever its dimensions.
    Label(String),
    /// The plate with exactly this identity.
    Exact(PlateId),
}

impl PlateQuery {
    pub fn matches(&self, id: &PlateId) -> bool {
        match self {
            PlateQuery::Label(label) => id.label() == label,
            PlateQuery::Exact(exact) => exact == id,
        }
    }
}

/// Anything that selects plates in a [`Stack`].
pub trait PlateSelector<V> {
    fn into_queries(self) -> Vec<PlateQuery>;
}

impl<V> PlateSelector<V> for &str {
    fn into_queries(self) -> Vec<PlateQuery> {
        vec![PlateQuery::Label(self.to_string())]
    }
}

impl<V> PlateSelector<V> for String {
    fn into_queries(self) -> Vec<PlateQuery> {
        vec![PlateQuery::Label(self)]
    }
}

impl<V> PlateSelector<V> for Vec<String> {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.into_iter().map(PlateQuery::Label).collect()
    }
}

impl<V> PlateSelector<V> for Vec<&str> {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.into_labels().into_iter().map(PlateQuery::Label).collect()
    }
}

impl<V> PlateSelector<V> for &[&str] {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.into_labels().into_iter().map(PlateQuery::Label).collect()
    }
}

impl<V, const N: usize> PlateSelector<V> for [&str; N] {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.into_labels().into_iter().map(PlateQuery::Label).collect()
    }
}

impl<V> PlateSelector<V> for &PlateId {
    fn into_queries(self) -> Vec<PlateQuery> {
        vec![PlateQuery::Exact(self.clone())]
    }
}

impl<V> PlateSelector<V> for &Plate<V> {
    fn into_queries(self) -> Vec<PlateQuery> {
        vec![PlateQuery::Exact(self.id())]
    }
}

impl<V> PlateSelector<V> for &[Plate<V>] {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.iter().map(|p| PlateQuery::Exact(p.id())).collect()
    }
}

impl<V> PlateSelector<V> for &Vec<Plate<V>> {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.as_slice().into_queries()
    }
}

impl<V> PlateSelector<V> for &Stack<V> {
    fn into_queries(self) -> Vec<PlateQuery> {
        self.ids().map(PlateQuery::Exact).collect()
    }
}

/// Anything that can be reduced to a sequence of plates.
pub trait PlateSource<V> {
    fn into_plates(self) -> Vec<Plate<V>>;
}

impl<V> PlateSource<V> for Plate<V> {
    fn into_plates(self) -> Vec<Plate<V>> {
        vec![self]
    }
}

impl<V: Clone> PlateSource<V> for &Plate<V> {
    fn into_plates(self) -> Vec<Plate<V>> {
        vec![self.clone()]
    }
}

impl<V> PlateSource<V> for Vec<Plate<V>> {
    fn into_plates(self) -> Vec<Plate<V>> {
        self
    }
}

impl<V: Clone> PlateSource<V> for &[Plate<V>] {
    fn into_plates(self) -> Vec<Plate<V>> {
        self.to_vec()
    }
}

impl<V, const N: usize> PlateSource<V> for [Plate<V>; N] {
    fn into_plates(self) -> Vec<Plate<V>> {
        self.into_iter().collect()
    }
}

impl<V> PlateSource<V> for Stack<V> {
    fn into_plates(self) -> Vec<Plate<V>> {
        self.into_iter().collect()
    }
}

impl<V: Clone> PlateSource<V> for &Stack<V> {
    fn into_plates(self) -> Vec<Plate<V>> {
        self.iter().cloned().collect()
    }
}
