//! core::plate
//!
//! A dimensioned [`WellSet`] plus named group overlays.
//!
//! # Dimensions
//!
//! A plate is created either from a [`PlateType`] or from explicit
//! `(rows, columns)`. Explicit dimensions are matched against the standard
//! table; a hit takes that type, a miss becomes [`PlateType::Custom`] with
//! the descriptor `"Custom Plate: <rows>x<columns>"`.
//!
//! Bounds are advisory: the plate does not reject wells outside its
//! dimensions. [`Plate::in_bounds`] reports whether a key fits.
//!
//! # Groups
//!
//! A group is a labeled [`KeyList`] describing which wells belong together.
//! It is a declared extent, not a live subset: removing a well from the plate
//! leaves every group untouched, and [`Plate::group`] resolves the group by
//! looking each key up in the plate's current wells, skipping those that are
//! gone.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::error::{PlateError, Result};
use super::input::{GroupSource, KeySource, LabelSource, WellSource};
use super::key::SpatialKey;
use super::key_list::KeyList;
use super::well::Well;
use super::well_set::WellSet;

/// Standard plate formats, plus custom dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlateType {
    Wells6,
    Wells12,
    Wells24,
    Wells48,
    Wells96,
    Wells384,
    Wells1536,
    Custom { rows: u32, columns: u32 },
}

/// Standard formats with their `(rows, columns)`.
static STANDARD: [(PlateType, u32, u32); 7] = [
    (PlateType::Wells6, 2, 3),
    (PlateType::Wells12, 3, 4),
    (PlateType::Wells24, 4, 6),
    (PlateType::Wells48, 6, 8),
    (PlateType::Wells96, 8, 12),
    (PlateType::Wells384, 16, 24),
    (PlateType::Wells1536, 32, 48),
];

impl PlateType {
    /// Every standard (non-custom) type, smallest first.
    pub fn standard() -> impl Iterator<Item = PlateType> {
        STANDARD.iter().map(|(kind, _, _)| *kind)
    }

    /// Resolve dimensions against the standard table.
    ///
    /// ```
    /// use microplate::core::plate::PlateType;
    ///
    /// assert_eq!(PlateType::from_dimensions(8, 12), PlateType::Wells96);
    /// assert_eq!(
    ///     PlateType::from_dimensions(7, 13),
    ///     PlateType::Custom { rows: 7, columns: 13 }
    /// );
    /// ```
    pub fn from_dimensions(rows: u32, columns: u32) -> Self {
        STANDARD
            .iter()
            .find(|(_, r, c)| *r == rows && *c == columns)
            .map(|(kind, _, _)| *kind)
            .unwrap_or(PlateType::Custom { rows, columns })
    }

    /// `(rows, columns)` for this type.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PlateType::Custom { rows, columns } => (*rows, *columns),
            standard => STANDARD
                .iter()
                .find(|(kind, _, _)| kind == standard)
                .map(|(_, r, c)| (*r, *c))
                .unwrap_or((0, 0)),
        }
    }

    pub fn rows(&self) -> u32 {
        self.dimensions().0
    }

    pub fn columns(&self) -> u32 {
        self.dimensions().1
    }

    /// Number of wells a full plate of this type holds.
    pub fn capacity(&self) -> u64 {
        let (rows, columns) = self.dimensions();
        u64::from(rows) * u64::from(columns)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PlateType::Custom { .. })
    }

    /// Human-readable name, e.g. `"96-Well"` or `"Custom Plate: 7x13"`.
    pub fn descriptor(&self) -> String {
        match self {
            PlateType::Custom { rows, columns } => format!("Custom Plate: {rows}x{columns}"),
            standard => format!("{}-Well", standard.capacity()),
        }
    }
}

impl fmt::Display for PlateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

/// Parses `"96"`, `"96-well"` or `"96-Well"`.
impl FromStr for PlateType {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        let count = text.strip_suffix("-well").unwrap_or(&text);
        Self::standard()
            .find(|kind| kind.capacity().to_string() == count)
            .ok_or_else(|| PlateError::UnknownPlateType(s.to_string()))
    }
}

impl Serialize for PlateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.descriptor())
    }
}

/// The identity and natural order of a plate: label, then dimensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlateId {
    label: String,
    rows: u32,
    columns: u32,
}

impl PlateId {
    pub fn new(label: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            label: label.into(),
            rows,
            columns,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }
}

impl fmt::Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.label, self.rows, self.columns)
    }
}

/// A labeled, dimensioned collection of wells with group overlays.
///
/// # Example
///
/// ```
/// use microplate::core::input::Delimited;
/// use microplate::core::key_list::KeyList;
/// use microplate::core::plate::{Plate, PlateType};
///
/// let mut plate: Plate<f64> = Plate::new("assay", PlateType::Wells96);
/// plate.add_wells(Delimited::new("A1,A2,B1", ",")).unwrap();
/// plate.add_groups(KeyList::parse("controls", "A1,B1", ",").unwrap());
///
/// plate.remove_wells("B1").unwrap();
/// let controls = plate.group("controls").unwrap();
/// assert_eq!(controls.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "V: Serialize"))]
pub struct Plate<V> {
    label: String,
    #[serde(rename = "type")]
    kind: PlateType,
    rows: u32,
    columns: u32,
    wells: WellSet<V>,
    groups: BTreeMap<String, KeyList>,
}

impl<V> Plate<V> {
    /// Create an empty plate of a given type.
    ///
    /// A `Custom` type whose dimensions match a standard format resolves to
    /// that format.
    pub fn new(label: impl Into<String>, kind: PlateType) -> Self {
        let (rows, columns) = kind.dimensions();
        Self::with_dimensions(label, rows, columns)
    }

    /// Create an empty plate with explicit dimensions.
    pub fn with_dimensions(label: impl Into<String>, rows: u32, columns: u32) -> Self {
        let label = label.into();
        Self {
            wells: WellSet::new(label.clone()),
            label,
            kind: PlateType::from_dimensions(rows, columns),
            rows,
            columns,
            groups: BTreeMap::new(),
        }
    }

    /// Replace the plate's wells wholesale (last-write-wins on duplicates).
    pub fn with_wells(mut self, wells: impl IntoIterator<Item = Well<V>>) -> Self {
        self.wells = WellSet::from_wells(self.label.clone(), wells);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.wells.set_label(self.label.clone());
    }

    pub fn plate_type(&self) -> PlateType {
        self.kind
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn descriptor(&self) -> String {
        self.kind.descriptor()
    }

    pub fn id(&self) -> PlateId {
        PlateId::new(self.label.clone(), self.rows, self.columns)
    }

    /// True if `key` lies within `[0, rows) x [1, columns]`.
    pub fn in_bounds(&self, key: &SpatialKey) -> bool {
        key.row() < self.rows && key.column() <= self.columns
    }

    // ---- wells ----

    /// The plate's wells.
    pub fn well_set(&self) -> &WellSet<V> {
        &self.wells
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Well<V>> + '_ {
        self.wells.iter()
    }

    /// See [`WellSet::add`].
    pub fn add_wells(&mut self, input: impl WellSource<V>) -> Result<usize> {
        self.wells.add(input)
    }

    /// See [`WellSet::remove`].
    pub fn remove_wells(&mut self, input: impl KeySource) -> Result<usize> {
        self.wells.remove(input)
    }

    /// See [`WellSet::replace`].
    pub fn replace_wells(&mut self, input: impl WellSource<V>) -> Result<()> {
        self.wells.replace(input)
    }

    /// See [`WellSet::retain`].
    pub fn retain_wells(&mut self, input: impl KeySource) -> Result<usize> {
        self.wells.retain(input)
    }

    /// See [`WellSet::contains`].
    pub fn contains(&self, input: impl KeySource) -> Result<bool> {
        self.wells.contains(input)
    }

    pub fn get_well(&self, key: &SpatialKey) -> Option<&Well<V>> {
        self.wells.get(key)
    }

    pub fn get_well_mut(&mut self, key: &SpatialKey) -> Option<&mut Well<V>> {
        self.wells.get_mut(key)
    }

    pub fn clear_wells(&mut self) {
        self.wells.clear();
    }

    // ---- groups ----

    /// Register groups. A group whose label is already registered is
    /// dropped, mirroring [`WellSet::add`].
    ///
    /// Returns how many groups were registered.
    pub fn add_groups(&mut self, input: impl GroupSource) -> usize {
        let mut added = 0;
        for group in input.into_groups() {
            if !self.groups.contains_key(group.label()) {
                self.groups.insert(group.label().to_string(), group);
                added += 1;
            }
        }
        tracing::debug!(plate = %self.label, added, "add groups");
        added
    }

    /// Unregister groups by label; unknown labels are ignored.
    pub fn remove_groups(&mut self, input: impl LabelSource) -> usize {
        input
            .into_labels()
            .iter()
            .filter(|label| self.groups.remove(label.as_str()).is_some())
            .count()
    }

    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// True if every label in `input` names a registered group.
    pub fn contains_group(&self, input: impl LabelSource) -> bool {
        input
            .into_labels()
            .iter()
            .all(|label| self.groups.contains_key(label.as_str()))
    }

    /// Registered group labels, sorted.
    pub fn group_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// The declared extent of a group.
    pub fn group_key_list(&self, label: &str) -> Option<&KeyList> {
        self.groups.get(label)
    }

    pub fn group_key_lists(&self) -> impl Iterator<Item = &KeyList> + '_ {
        self.groups.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl<V: Clone> Plate<V> {
    /// See [`WellSet::get_all`].
    pub fn get_wells(&self, input: impl KeySource) -> Result<Option<WellSet<V>>> {
        self.wells.get_all(input)
    }

    pub fn row(&self, row: u32) -> WellSet<V> {
        self.wells.row(row)
    }

    pub fn column(&self, column: u32) -> WellSet<V> {
        self.wells.column(column)
    }

    /// Resolve a group against the plate's current wells.
    ///
    /// Keys listed in the group but absent from the plate are skipped.
    /// Returns `None` only when no group has this label.
    pub fn group(&self, label: &str) -> Option<WellSet<V>> {
        let extent = self.groups.get(label)?;
        Some(WellSet::from_wells(
            label,
            extent.iter().filter_map(|key| self.wells.get(key)).cloned(),
        ))
    }

    /// Resolve several groups. Unknown labels are skipped.
    pub fn get_groups(&self, input: impl LabelSource) -> Vec<WellSet<V>> {
        input
            .into_labels()
            .iter()
            .filter_map(|label| self.group(label))
            .collect()
    }
}

/// Integer plate.
pub type PlateInteger = Plate<i32>;
/// Floating-point plate.
pub type PlateDouble = Plate<f64>;
/// Exact decimal plate.
pub type PlateDecimal = Plate<rust_decimal::Decimal>;
/// Wide integer plate.
pub type PlateBigInteger = Plate<i128>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Delimited;

    fn key(s: &str) -> SpatialKey {
        SpatialKey::parse(s).unwrap()
    }

    fn indexes(set: &WellSet<i32>) -> Vec<String> {
        set.iter().map(Well::index).collect()
    }

    mod plate_type {
        use super::*;

        #[test]
        fn standard_table() {
            let table: Vec<(String, u32, u32)> = PlateType::standard()
                .map(|k| (k.descriptor(), k.rows(), k.columns()))
                .collect();
            assert_eq!(
                table,
                vec![
                    ("6-Well".to_string(), 2, 3),
                    ("12-Well".to_string(), 3, 4),
                    ("24-Well".to_string(), 4, 6),
                    ("48-Well".to_string(), 6, 8),
                    ("96-Well".to_string(), 8, 12),
                    ("384-Well".to_string(), 16, 24),
                    ("1536-Well".to_string(), 32, 48),
                ]
            );
        }

        #[test]
        fn parse_accepts_count_and_descriptor() {
            assert_eq!("96".parse::<PlateType>().unwrap(), PlateType::Wells96);
            assert_eq!("384-Well".parse::<PlateType>().unwrap(), PlateType::Wells384);
            assert_eq!(" 6-well ".parse::<PlateType>().unwrap(), PlateType::Wells6);
        }

        #[test]
        fn parse_rejects_unknown() {
            assert_eq!(
                "95".parse::<PlateType>(),
                Err(PlateError::UnknownPlateType("95".into()))
            );
        }

        #[test]
        fn swapped_dimensions_are_custom() {
            assert!(PlateType::from_dimensions(12, 8).is_custom());
        }
    }

    mod dimensions {
        use super::*;

        #[test]
        fn from_type_tag() {
            let plate: Plate<i32> = Plate::new("p", PlateType::Wells96);
            assert_eq!(plate.descriptor(), "96-Well");
            assert_eq!(plate.rows(), 8);
            assert_eq!(plate.columns(), 12);
        }

        #[test]
        fn explicit_dimensions_matching_standard() {
            let plate: Plate<i32> = Plate::with_dimensions("p", 16, 24);
            assert_eq!(plate.plate_type(), PlateType::Wells384);
        }

        #[test]
        fn explicit_dimensions_custom() {
            let plate: Plate<i32> = Plate::with_dimensions("p", 7, 13);
            assert_eq!(plate.descriptor(), "Custom Plate: 7x13");
            assert!(plate.plate_type().is_custom());
        }

        #[test]
        fn custom_tag_with_standard_dimensions_resolves() {
            let plate: Plate<i32> = Plate::new("p", PlateType::Custom { rows: 2, columns: 3 });
            assert_eq!(plate.plate_type(), PlateType::Wells6);
        }

        #[test]
        fn bounds_are_reported_not_enforced() {
            let mut plate: Plate<i32> = Plate::new("p", PlateType::Wells6);
            assert!(plate.in_bounds(&key("B3")));
            assert!(!plate.in_bounds(&key("C1")));
            assert!(!plate.in_bounds(&key("A4")));
            plate.add_wells(key("H12")).unwrap();
            assert!(plate.contains("H12").unwrap());
        }
    }

    mod wells {
        use super::*;

        #[test]
        fn operations_delegate_to_the_well_set() {
            let mut plate: Plate<i32> = Plate::new("p", PlateType::Wells96);
            plate
                .add_wells(vec![
                    Well::with_values(key("A1"), vec![1]),
                    Well::with_values(key("B2"), vec![2]),
                    Well::with_values(key("C3"), vec![3]),
                ])
                .unwrap();
            plate.add_wells(Well::with_values(key("A1"), vec![99])).unwrap();
            assert_eq!(plate.get_well(&key("A1")).unwrap().data(), &[1]);

            plate.replace_wells(Well::with_values(key("A1"), vec![10])).unwrap();
            assert_eq!(plate.get_well(&key("A1")).unwrap().data(), &[10]);

            plate.retain_wells(Delimited::new("A1,B2", ",")).unwrap();
            assert_eq!(indexes(plate.well_set()), ["A1", "B2"]);

            plate.remove_wells(key("B2")).unwrap();
            assert_eq!(plate.len(), 1);
            assert!(plate.get_wells("B2").unwrap().is_none());
        }

        #[test]
        fn row_and_column_passthrough() {
            let plate: Plate<i32> = Plate::new("p", PlateType::Wells96)
                .with_wells(["A1", "A5", "B5"].map(|k| Well::new(key(k))));
            assert_eq!(indexes(&plate.row(0)), ["A1", "A5"]);
            assert_eq!(indexes(&plate.column(5)), ["A5", "B5"]);
        }

        #[test]
        fn relabel_updates_well_set() {
            let mut plate: Plate<i32> = Plate::new("old", PlateType::Wells6);
            plate.set_label("new");
            assert_eq!(plate.well_set().label(), "new");
            assert_eq!(plate.id().label(), "new");
        }
    }

    mod groups {
        use super::*;

        fn plate() -> Plate<i32> {
            let mut plate = Plate::new("p", PlateType::Wells96).with_wells(
                ["A1", "A2", "B1", "B2"].map(|k| Well::with_values(key(k), vec![1])),
            );
            plate.add_groups(vec![
                KeyList::parse("left", "A1,B1", ",").unwrap(),
                KeyList::parse("top", "A1,A2", ",").unwrap(),
            ]);
            plate
        }

        #[test]
        fn add_groups_keeps_first_label() {
            let mut plate = plate();
            let added = plate.add_groups(KeyList::parse("left", "B2", ",").unwrap());
            assert_eq!(added, 0);
            assert_eq!(plate.group_key_list("left").unwrap().to_string(), "A1,B1");
        }

        #[test]
        fn group_resolves_against_current_wells() {
            let plate = plate();
            assert_eq!(indexes(&plate.group("left").unwrap()), ["A1", "B1"]);
        }

        #[test]
        fn group_view_skips_removed_wells() {
            let mut plate = plate();
            plate.remove_wells("B1").unwrap();
            assert_eq!(indexes(&plate.group("left").unwrap()), ["A1"]);
            assert!(plate.group_key_list("left").unwrap().contains(&key("B1")));
        }

        #[test]
        fn group_keys_outside_the_plate_are_skipped() {
            let mut plate = plate();
            plate.add_groups(KeyList::parse("ghost", "H12", ",").unwrap());
            assert!(plate.group("ghost").unwrap().is_empty());
        }

        #[test]
        fn unknown_group_is_none() {
            assert!(plate().group("missing").is_none());
        }

        #[test]
        fn get_groups_skips_unknown_labels() {
            let groups = plate().get_groups(["top", "missing", "left"]);
            let labels: Vec<&str> = groups.iter().map(WellSet::label).collect();
            assert_eq!(labels, ["top", "left"]);
        }

        #[test]
        fn well_set_as_group_definition() {
            let mut plate = plate();
            let diagonal = plate.get_wells(Delimited::new("A1,B2", ",")).unwrap().unwrap();
            let mut diagonal = diagonal;
            diagonal.set_label("diagonal");
            plate.add_groups(&diagonal);
            assert!(plate.contains_group("diagonal"));
        }

        #[test]
        fn remove_contains_and_clear() {
            let mut plate = plate();
            assert!(plate.contains_group(["left", "top"]));
            assert!(!plate.contains_group(["left", "nope"]));
            assert_eq!(plate.remove_groups(["left", "nope"]), 1);
            assert_eq!(plate.group_labels().collect::<Vec<_>>(), ["top"]);
            plate.clear_groups();
            assert_eq!(plate.group_count(), 0);
            assert_eq!(plate.len(), 4);
        }
    }
}
