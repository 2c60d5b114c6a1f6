//! core::well
//!
//! A single measurement slot: a [`SpatialKey`] plus an ordered sequence of
//! payload values.
//!
//! A well is never re-keyed. Its identity inside a [`WellSet`] is the key
//! alone; the values are payload and take no part in ordering or set
//! membership.
//!
//! [`WellSet`]: super::well_set::WellSet

use std::cmp::Ordering;

use serde::Serialize;

use super::error::Result;
use super::key::SpatialKey;

/// A keyed sequence of measurement values.
///
/// `PartialEq` compares key and payload; use [`Well::same_slot`] for the
/// key-only comparison that collections use.
///
/// # Example
///
/// ```
/// use microplate::core::key::SpatialKey;
/// use microplate::core::well::Well;
///
/// let mut well = Well::with_values(SpatialKey::parse("C4").unwrap(), vec![1, 2]);
/// well.append([3]);
/// assert_eq!(well.data(), &[1, 2, 3]);
/// assert_eq!(well.index(), "C4");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Well<V> {
    key: SpatialKey,
    values: Vec<V>,
}

impl<V> Well<V> {
    /// Create an empty well.
    pub fn new(key: SpatialKey) -> Self {
        Self {
            key,
            values: Vec::new(),
        }
    }

    /// Create a well holding `values`.
    pub fn with_values(key: SpatialKey, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            key,
            values: values.into_iter().collect(),
        }
    }

    /// Create an empty well from a canonical key string.
    ///
    /// # Errors
    ///
    /// Propagates the parse failure from [`SpatialKey::parse`].
    pub fn parse(index: &str) -> Result<Self> {
        Ok(Self::new(SpatialKey::parse(index)?))
    }

    pub fn key(&self) -> SpatialKey {
        self.key
    }

    pub fn row(&self) -> u32 {
        self.key.row()
    }

    pub fn column(&self) -> u32 {
        self.key.column()
    }

    /// The canonical string of this well's key.
    pub fn index(&self) -> String {
        self.key.to_string()
    }

    /// Append values to the end of the payload.
    pub fn append(&mut self, values: impl IntoIterator<Item = V>) {
        self.values.extend(values);
    }

    /// Drop every value, keeping the key.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Borrow the payload in insertion order.
    pub fn data(&self) -> &[V] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<V> {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<V> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Swap in a new payload and return the old one.
    pub(crate) fn replace_values(&mut self, values: Vec<V>) -> Vec<V> {
        std::mem::replace(&mut self.values, values)
    }

    /// Key-only comparison, the order used by every collection.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }

    /// True if both wells occupy the same coordinate, whatever their payload.
    pub fn same_slot(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<V> From<SpatialKey> for Well<V> {
    fn from(key: SpatialKey) -> Self {
        Self::new(key)
    }
}

/// Integer measurements.
pub type WellInteger = Well<i32>;
/// Floating-point measurements.
pub type WellDouble = Well<f64>;
/// Exact decimal measurements.
pub type WellDecimal = Well<rust_decimal::Decimal>;
/// Wide integer measurements.
pub type WellBigInteger = Well<i128>;

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SpatialKey {
        SpatialKey::parse(s).unwrap()
    }

    #[test]
    fn new_well_is_empty() {
        let well: Well<i32> = Well::new(key("A1"));
        assert!(well.is_empty());
        assert_eq!(well.row(), 0);
        assert_eq!(well.column(), 1);
    }

    #[test]
    fn append_preserves_order() {
        let mut well = Well::with_values(key("B2"), vec![5.0, 1.5]);
        well.append(vec![2.25]);
        assert_eq!(well.data(), &[5.0, 1.5, 2.25]);
        assert_eq!(well.len(), 3);
    }

    #[test]
    fn clear_keeps_key() {
        let mut well = Well::with_values(key("D7"), vec![1, 2, 3]);
        well.clear();
        assert!(well.is_empty());
        assert_eq!(well.index(), "D7");
    }

    #[test]
    fn structural_equality_includes_payload() {
        let a = Well::with_values(key("A1"), vec![1]);
        let b = Well::with_values(key("A1"), vec![2]);
        assert_ne!(a, b);
        assert!(a.same_slot(&b));
        assert_eq!(a.cmp_key(&b), Ordering::Equal);
    }

    #[test]
    fn cmp_key_is_row_major() {
        let a: Well<i32> = Well::new(key("A12"));
        let b: Well<i32> = Well::new(key("B1"));
        assert_eq!(a.cmp_key(&b), Ordering::Less);
    }

    #[test]
    fn parse_rejects_bad_index() {
        assert!(Well::<i32>::parse("??").is_err());
        assert_eq!(Well::<i32>::parse("C3").unwrap().key(), key("C3"));
    }

    #[test]
    fn decimal_payload() {
        use rust_decimal::Decimal;
        let well: WellDecimal = Well::with_values(key("A2"), vec![Decimal::new(125, 2)]);
        assert_eq!(well.data()[0].to_string(), "1.25");
    }
}
