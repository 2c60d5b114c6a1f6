//! core::stack
//!
//! An ordered collection of plates.
//!
//! A stack applies the [`WellSet`] discipline one level up: plates are
//! unique by their [`PlateId`] (label, then dimensions) and iterate in that
//! order. Selection by label matches every plate carrying that label;
//! selection by plate matches its exact identity.
//!
//! The stack's own dimensions describe the plates it is meant to hold and,
//! like plate bounds, are not enforced.
//!
//! [`WellSet`]: super::well_set::WellSet

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Serialize, Serializer};

use super::error::{PlateError, Result};
use super::input::{PlateQuery, PlateSelector, PlateSource};
use super::plate::{Plate, PlateId, PlateType};

/// A labeled, ordered set of plates.
///
/// # Example
///
/// ```
/// use microplate::core::plate::{Plate, PlateType};
/// use microplate::core::stack::Stack;
///
/// let mut stack: Stack<i32> = Stack::new("run-1", PlateType::Wells96);
/// for label in ["P1", "P2", "P3"] {
///     stack.add(Plate::new(label, PlateType::Wells96));
/// }
/// stack.retain(["P1", "P3"]);
/// assert_eq!(stack.len(), 2);
/// assert!(!stack.contains("P2"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "V: Serialize"))]
pub struct Stack<V> {
    label: String,
    #[serde(rename = "type")]
    kind: PlateType,
    rows: u32,
    columns: u32,
    #[serde(serialize_with = "plates_as_seq")]
    plates: BTreeMap<PlateId, Plate<V>>,
}

fn plates_as_seq<S, V>(
    plates: &BTreeMap<PlateId, Plate<V>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_seq(plates.values())
}

impl<V> Stack<V> {
    /// Create an empty stack for plates of a given type.
    pub fn new(label: impl Into<String>, kind: PlateType) -> Self {
        let (rows, columns) = kind.dimensions();
        Self::with_dimensions(label, rows, columns)
    }

    /// Create an empty stack for plates of explicit dimensions.
    pub fn with_dimensions(label: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self {
            label: label.into(),
            kind: PlateType::from_dimensions(rows, columns),
            rows,
            columns,
            plates: BTreeMap::new(),
        }
    }

    /// Build a stack from plates, last-write-wins on duplicate identities.
    pub fn from_plates(
        label: impl Into<String>,
        kind: PlateType,
        plates: impl IntoIterator<Item = Plate<V>>,
    ) -> Self {
        let mut stack = Self::new(label, kind);
        for plate in plates {
            stack.plates.insert(plate.id(), plate);
        }
        stack
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
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

    /// Number of plates.
    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Total number of wells across all plates.
    pub fn well_count(&self) -> usize {
        self.plates.values().map(Plate::len).sum()
    }

    pub fn clear(&mut self) {
        self.plates.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Plate<V>> + ExactSizeIterator + '_ {
        self.plates.values()
    }

    pub fn iter_rev(&self) -> impl Iterator<Item = &Plate<V>> + '_ {
        self.plates.values().rev()
    }

    /// Plate identities in order.
    pub fn ids(&self) -> impl Iterator<Item = PlateId> + '_ {
        self.plates.keys().cloned()
    }

    /// Plate labels in order. A label repeats if plates of different
    /// dimensions share it.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.plates.keys().map(PlateId::label)
    }

    /// The first plate carrying `label`.
    pub fn get(&self, label: &str) -> Option<&Plate<V>> {
        self.plates.values().find(|plate| plate.label() == label)
    }

    pub fn get_by_id(&self, id: &PlateId) -> Option<&Plate<V>> {
        self.plates.get(id)
    }

    /// Edit the plate with identity `id` in place.
    ///
    /// The plate is re-keyed afterwards, so relabeling inside `edit` keeps
    /// the stack ordered. Returns `Ok(None)` if no plate has identity `id`.
    ///
    /// # Errors
    ///
    /// `PlateError::DuplicatePlate` if the edit relabels the plate onto the
    /// identity of another plate. The label is then restored and the plate
    /// stays under `id`; its other edits are kept.
    pub fn update<R>(
        &mut self,
        id: &PlateId,
        edit: impl FnOnce(&mut Plate<V>) -> R,
    ) -> Result<Option<R>> {
        let Some(mut plate) = self.plates.remove(id) else {
            return Ok(None);
        };
        let result = edit(&mut plate);
        let new_id = plate.id();
        if new_id != *id && self.plates.contains_key(&new_id) {
            tracing::debug!(stack = %self.label, plate = %id, clash = %new_id, "update rejected");
            plate.set_label(id.label());
            self.plates.insert(id.clone(), plate);
            return Err(PlateError::DuplicatePlate(new_id.to_string()));
        }
        self.plates.insert(new_id, plate);
        Ok(Some(result))
    }

    /// Insert plates whose identity is absent; others are dropped.
    ///
    /// Returns how many plates were inserted.
    pub fn add(&mut self, input: impl PlateSource<V>) -> usize {
        let mut added = 0;
        for plate in input.into_plates() {
            if let Entry::Vacant(slot) = self.plates.entry(plate.id()) {
                slot.insert(plate);
                added += 1;
            }
        }
        tracing::debug!(stack = %self.label, added, "add plates");
        added
    }

    /// Remove every plate matched by `input`. Unmatched selections are
    /// ignored.
    pub fn remove(&mut self, input: impl PlateSelector<V>) -> usize {
        let queries = input.into_queries();
        let before = self.plates.len();
        self.plates
            .retain(|id, _| !queries.iter().any(|query| query.matches(id)));
        let removed = before - self.plates.len();
        tracing::debug!(stack = %self.label, removed, "remove plates");
        removed
    }

    /// Keep only plates matched by `input`.
    pub fn retain(&mut self, input: impl PlateSelector<V>) -> usize {
        let queries = input.into_queries();
        let before = self.plates.len();
        self.plates
            .retain(|id, _| queries.iter().any(|query| query.matches(id)));
        let removed = before - self.plates.len();
        tracing::debug!(stack = %self.label, removed, "retain plates");
        removed
    }

    /// Overwrite plates with incoming ones, wells and groups included.
    ///
    /// A plate with the same identity is overwritten one-to-one. Failing
    /// that, every plate with the incoming label is dropped in its favour.
    /// Plates matching neither are inserted.
    pub fn replace(&mut self, input: impl PlateSource<V>) {
        for plate in input.into_plates() {
            let id = plate.id();
            let replaced = if self.plates.contains_key(&id) {
                1
            } else {
                let before = self.plates.len();
                self.plates.retain(|existing, _| existing.label() != id.label());
                before - self.plates.len()
            };
            tracing::debug!(stack = %self.label, plate = %id, replaced, "replace plate");
            self.plates.insert(id, plate);
        }
    }

    /// True if every selection in `input` matches at least one plate.
    pub fn contains(&self, input: impl PlateSelector<V>) -> bool {
        input
            .into_queries()
            .iter()
            .all(|query| self.plates.keys().any(|id| query.matches(id)))
    }

    pub fn first(&self) -> Result<&Plate<V>> {
        self.plates
            .values()
            .next()
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    pub fn last(&self) -> Result<&Plate<V>> {
        self.plates
            .values()
            .next_back()
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    pub fn pop_first(&mut self) -> Result<Plate<V>> {
        self.plates
            .pop_first()
            .map(|(_, plate)| plate)
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    pub fn pop_last(&mut self) -> Result<Plate<V>> {
        self.plates
            .pop_last()
            .map(|(_, plate)| plate)
            .ok_or_else(|| PlateError::empty(&self.label))
    }

    pub fn ceiling(&self, id: &PlateId) -> Option<&Plate<V>> {
        self.plates.range(id..).next().map(|(_, p)| p)
    }

    pub fn floor(&self, id: &PlateId) -> Option<&Plate<V>> {
        self.plates.range(..=id).next_back().map(|(_, p)| p)
    }

    pub fn higher(&self, id: &PlateId) -> Option<&Plate<V>> {
        self.plates
            .range((Bound::Excluded(id), Bound::Unbounded))
            .next()
            .map(|(_, p)| p)
    }

    pub fn lower(&self, id: &PlateId) -> Option<&Plate<V>> {
        self.plates.range(..id).next_back().map(|(_, p)| p)
    }
}

impl<V: Clone> Stack<V> {
    fn collect_from<'a>(&self, plates: impl Iterator<Item = &'a Plate<V>>) -> Stack<V>
    where
        V: 'a,
    {
        let mut stack = Stack::with_dimensions(self.label.clone(), self.rows, self.columns);
        for plate in plates {
            stack.plates.insert(plate.id(), plate.clone());
        }
        stack
    }

    /// Copy out the plates matched by `input`; `None` if nothing matched.
    pub fn get_all(&self, input: impl PlateSelector<V>) -> Option<Stack<V>> {
        let queries = input.into_queries();
        let found = self.collect_from(
            self.plates
                .iter()
                .filter(|(id, _)| queries.iter().any(|query| query.matches(id)))
                .map(|(_, plate)| plate),
        );
        (!found.is_empty()).then_some(found)
    }

    pub fn head_stack(&self, id: &PlateId, inclusive: bool) -> Stack<V> {
        let hi = if inclusive {
            Bound::Included(id)
        } else {
            Bound::Excluded(id)
        };
        self.collect_from(self.range_iter(Bound::Unbounded, hi))
    }

    pub fn tail_stack(&self, id: &PlateId, inclusive: bool) -> Stack<V> {
        let lo = if inclusive {
            Bound::Included(id)
        } else {
            Bound::Excluded(id)
        };
        self.collect_from(self.range_iter(lo, Bound::Unbounded))
    }

    /// Plates between `lo` and `hi`; empty when `lo > hi`.
    pub fn sub_stack(
        &self,
        lo: &PlateId,
        lo_inclusive: bool,
        hi: &PlateId,
        hi_inclusive: bool,
    ) -> Stack<V> {
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

    /// A copy of the plates in descending order. A `Stack` always iterates
    /// ascending, so this is a `Vec`.
    pub fn descending(&self) -> Vec<Plate<V>> {
        self.iter_rev().cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<Plate<V>> {
        self.iter().cloned().collect()
    }

    fn range_iter<'a>(
        &'a self,
        lo: Bound<&'a PlateId>,
        hi: Bound<&'a PlateId>,
    ) -> Box<dyn Iterator<Item = &'a Plate<V>> + 'a> {
        let empty = match (lo, hi) {
            (Bound::Included(a), Bound::Included(b)) => a > b,
            (Bound::Included(a), Bound::Excluded(b))
            | (Bound::Excluded(a), Bound::Included(b))
            | (Bound::Excluded(a), Bound::Excluded(b)) => a >= b,
            _ => false,
        };
        if empty {
            return Box::new(std::iter::empty());
        }
        Box::new(self.plates.range((lo, hi)).map(|(_, p)| p))
    }
}

impl<V> IntoIterator for Stack<V> {
    type Item = Plate<V>;
    type IntoIter = std::collections::btree_map::IntoValues<PlateId, Plate<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.plates.into_values()
    }
}

impl<'a, V> IntoIterator for &'a Stack<V> {
    type Item = &'a Plate<V>;
    type IntoIter = std::collections::btree_map::Values<'a, PlateId, Plate<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.plates.values()
    }
}

/// Integer stack.
pub type StackInteger = Stack<i32>;
/// Floating-point stack.
pub type StackDouble = Stack<f64>;
/// Exact decimal stack.
pub type StackDecimal = Stack<rust_decimal::Decimal>;
/// Wide integer stack.
pub type StackBigInteger = Stack<i128>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::SpatialKey;
    use crate::core::key_list::KeyList;
    use crate::core::well::Well;

    fn plate(label: &str) -> Plate<i32> {
        Plate::new(label, PlateType::Wells96)
    }

    fn labels(stack: &Stack<i32>) -> Vec<&str> {
        stack.labels().collect()
    }

    fn sample() -> Stack<i32> {
        Stack::from_plates(
            "run",
            PlateType::Wells96,
            vec![plate("P3"), plate("P1"), plate("P2")],
        )
    }

    #[test]
    fn plates_ordered_by_label_then_dimensions() {
        let mut stack = sample();
        stack.add(Plate::with_dimensions("P1", 16, 24));
        let ids: Vec<String> = stack.ids().map(|id| id.to_string()).collect();
        assert_eq!(
            ids,
            ["P1 (8x12)", "P1 (16x24)", "P2 (8x12)", "P3 (8x12)"]
        );
    }

    #[test]
    fn add_rejects_duplicate_identity() {
        let mut stack = sample();
        let replacement = plate("P1").with_wells([Well::new(SpatialKey::parse("A1").unwrap())]);
        assert_eq!(stack.add(replacement), 0);
        assert!(stack.get("P1").unwrap().is_empty());
    }

    #[test]
    fn retain_by_labels() {
        let mut stack = sample();
        stack.retain(["P1", "P3"]);
        assert_eq!(stack.len(), 2);
        assert!(!stack.contains("P2"));
        assert!(stack.contains(["P1", "P3"]));
    }

    #[test]
    fn remove_by_plate_and_label() {
        let mut stack = sample();
        assert_eq!(stack.remove(&plate("P2")), 1);
        assert_eq!(stack.remove("nope"), 0);
        assert_eq!(stack.remove(vec!["P1".to_string()]), 1);
        assert_eq!(labels(&stack), ["P3"]);
    }

    #[test]
    fn exact_selection_needs_matching_dimensions() {
        let stack = sample();
        assert!(!stack.contains(&Plate::<i32>::with_dimensions("P1", 16, 24)));
        assert!(stack.contains(&plate("P1")));
    }

    #[test]
    fn replace_overwrites_wells_and_groups() {
        let mut stack = sample();
        let mut fresh = plate("P2").with_wells([Well::with_values(
            SpatialKey::parse("B2").unwrap(),
            vec![42],
        )]);
        fresh.add_groups(KeyList::parse("g", "B2", ",").unwrap());
        stack.replace(fresh);

        let p2 = stack.get("P2").unwrap();
        assert_eq!(p2.len(), 1);
        assert!(p2.contains_group("g"));
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn replace_matches_by_label_across_dimensions() {
        let mut stack = sample();
        stack.replace(Plate::with_dimensions("P2", 16, 24));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.get("P2").unwrap().rows(), 16);
    }

    #[test]
    fn replace_prefers_exact_identity() {
        let mut stack: Stack<i32> = Stack::new("s", PlateType::Wells96);
        stack.add(vec![
            Plate::with_dimensions("P1", 8, 12),
            Plate::with_dimensions("P1", 16, 24),
        ]);

        let fresh = Plate::with_dimensions("P1", 8, 12)
            .with_wells([Well::with_values(SpatialKey::parse("A1").unwrap(), vec![1])]);
        stack.replace(fresh);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.get_by_id(&PlateId::new("P1", 8, 12)).unwrap().len(), 1);
        assert!(stack.contains(&PlateId::new("P1", 16, 24)));

        // No exact match: every plate labeled P1 gives way.
        stack.replace(Plate::with_dimensions("P1", 32, 48));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.get("P1").unwrap().rows(), 32);
    }

    #[test]
    fn replace_inserts_new_label() {
        let mut stack = sample();
        stack.replace(plate("P4"));
        assert_eq!(labels(&stack), ["P1", "P2", "P3", "P4"]);
    }

    #[test]
    fn get_all_is_all_or_nothing() {
        let stack = sample();
        let found = stack.get_all(["P1", "P9"]).unwrap();
        assert_eq!(labels(&found), ["P1"]);
        assert!(stack.get_all(["P8", "P9"]).is_none());
    }

    #[test]
    fn navigation() {
        let mut stack = sample();
        let p2 = plate("P2").id();
        assert_eq!(stack.first().unwrap().label(), "P1");
        assert_eq!(stack.last().unwrap().label(), "P3");
        assert_eq!(stack.ceiling(&p2).unwrap().label(), "P2");
        assert_eq!(stack.higher(&p2).unwrap().label(), "P3");
        assert_eq!(stack.lower(&p2).unwrap().label(), "P1");
        assert_eq!(stack.floor(&p2).unwrap().label(), "P2");
        assert!(stack.higher(&plate("P3").id()).is_none());

        assert_eq!(labels(&stack.head_stack(&p2, false)), ["P1"]);
        assert_eq!(labels(&stack.tail_stack(&p2, true)), ["P2", "P3"]);
        assert!(stack
            .sub_stack(&plate("P3").id(), true, &plate("P1").id(), true)
            .is_empty());

        let desc: Vec<String> = stack.descending().iter().map(|p| p.label().to_string()).collect();
        assert_eq!(desc, ["P3", "P2", "P1"]);

        assert_eq!(stack.pop_first().unwrap().label(), "P1");
        assert_eq!(stack.pop_last().unwrap().label(), "P3");
        assert_eq!(labels(&stack), ["P2"]);
    }

    #[test]
    fn empty_stack_navigation_fails() {
        let mut stack: Stack<i32> = Stack::new("empty", PlateType::Wells6);
        assert!(matches!(stack.first(), Err(PlateError::EmptyCollection(_))));
        assert!(matches!(stack.pop_last(), Err(PlateError::EmptyCollection(_))));
    }

    #[test]
    fn update_rekeys_relabeled_plate() {
        let mut stack = sample();
        let id = plate("P1").id();
        stack.update(&id, |p| p.set_label("P9")).unwrap();
        assert_eq!(labels(&stack), ["P2", "P3", "P9"]);
        assert!(stack.update(&id, |_| ()).unwrap().is_none());
    }

    #[test]
    fn update_onto_taken_identity_is_rejected() {
        let mut stack = sample();
        let p2 = plate("P2").id();
        stack
            .update(&p2, |p| p.add_wells(SpatialKey::parse("A1").unwrap()))
            .unwrap();

        let err = stack
            .update(&plate("P1").id(), |p| p.set_label("P2"))
            .unwrap_err();
        assert!(matches!(err, PlateError::DuplicatePlate(_)));

        assert_eq!(labels(&stack), ["P1", "P2", "P3"]);
        assert_eq!(stack.get_by_id(&p2).unwrap().len(), 1);
        assert_eq!(stack.get("P1").unwrap().well_set().label(), "P1");
    }

    #[test]
    fn well_count_sums_plates() {
        let mut stack = sample();
        let id = plate("P1").id();
        stack
            .update(&id, |p| p.add_wells(SpatialKey::parse("A1").unwrap()))
            .unwrap();
        assert_eq!(stack.well_count(), 1);
    }
}
