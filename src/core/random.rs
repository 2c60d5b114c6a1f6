//! core::random
//!
//! Random wells, well sets, plates and stacks for demos and tests.
//!
//! The generator only ever builds structures through the public engine
//! operations, so everything it produces upholds the same invariants as
//! hand-built data. Keys always satisfy `row >= 0, column >= 1`.
//!
//! # Example
//!
//! ```
//! use microplate::core::plate::PlateType;
//! use microplate::core::random::{Bounds, Generator};
//!
//! let mut generator = Generator::seeded(7);
//! let bounds = Bounds::for_type(PlateType::Wells96, 0..=100).values_per_well(1..=3);
//! let plate = generator.plate("demo", PlateType::Wells96, &bounds, 24);
//!
//! assert_eq!(plate.len(), 24);
//! assert!(plate.iter().all(|w| plate.in_bounds(&w.key())));
//! ```

use std::ops::{Range, RangeInclusive};

use rand::distr::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::key::SpatialKey;
use super::plate::{Plate, PlateType};
use super::stack::Stack;
use super::well::Well;
use super::well_set::WellSet;

/// Limits for generated data.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<V> {
    rows: Range<u32>,
    columns: RangeInclusive<u32>,
    values: RangeInclusive<V>,
    values_per_well: RangeInclusive<usize>,
}

impl<V> Bounds<V> {
    /// Bounds covering a whole plate of `kind`, one value per well.
    pub fn for_type(kind: PlateType, values: RangeInclusive<V>) -> Self {
        let (rows, columns) = kind.dimensions();
        Self::new(0..rows, 1..=columns, values)
    }

    /// Explicit coordinate bounds. A column range starting at 0 is moved to
    /// start at 1.
    pub fn new(rows: Range<u32>, columns: RangeInclusive<u32>, values: RangeInclusive<V>) -> Self {
        let (start, end) = columns.into_inner();
        Self {
            rows,
            columns: start.max(1)..=end,
            values,
            values_per_well: 1..=1,
        }
    }

    /// How many values each generated well holds.
    pub fn values_per_well(mut self, range: RangeInclusive<usize>) -> Self {
        self.values_per_well = range;
        self
    }

    fn column_count(&self) -> u64 {
        let (start, end) = (*self.columns.start(), *self.columns.end());
        if start > end {
            0
        } else {
            u64::from(end - start) + 1
        }
    }

    fn row_count(&self) -> u64 {
        u64::from(self.rows.end.saturating_sub(self.rows.start))
    }

    /// Number of distinct keys inside the bounds.
    pub fn capacity(&self) -> u64 {
        self.row_count() * self.column_count()
    }

    fn key_at(&self, index: u64) -> Option<SpatialKey> {
        let columns = self.column_count();
        let row = u32::try_from(index / columns).ok()? + self.rows.start;
        let column = u32::try_from(index % columns).ok()? + *self.columns.start();
        SpatialKey::new(row, column).ok()
    }
}

/// A seedable source of random plate data.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A random key inside `bounds`, or `None` if the bounds are empty.
    pub fn key<V>(&mut self, bounds: &Bounds<V>) -> Option<SpatialKey> {
        let capacity = bounds.capacity();
        if capacity == 0 {
            return None;
        }
        bounds.key_at(self.rng.random_range(0..capacity))
    }

    fn values<V>(&mut self, bounds: &Bounds<V>) -> Vec<V>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        if bounds.values.is_empty() || bounds.values_per_well.is_empty() {
            return Vec::new();
        }
        let count = self.rng.random_range(bounds.values_per_well.clone());
        (0..count)
            .map(|_| self.rng.random_range(bounds.values.clone()))
            .collect()
    }

    /// A well at `key` with random values.
    pub fn well_at<V>(&mut self, key: SpatialKey, bounds: &Bounds<V>) -> Well<V>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        let values = self.values(bounds);
        Well::with_values(key, values)
    }

    /// A well at a random key, or `None` if the bounds are empty.
    pub fn well<V>(&mut self, bounds: &Bounds<V>) -> Option<Well<V>>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        let key = self.key(bounds)?;
        Some(self.well_at(key, bounds))
    }

    /// A set of `size` wells at distinct random keys. `size` is clamped to
    /// the capacity of the bounds.
    pub fn well_set<V>(&mut self, label: &str, bounds: &Bounds<V>, size: usize) -> WellSet<V>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        let capacity = usize::try_from(bounds.capacity()).unwrap_or(usize::MAX);
        let amount = size.min(capacity);
        let indices = rand::seq::index::sample(&mut self.rng, capacity, amount);

        let wells: Vec<Well<V>> = indices
            .into_iter()
            .filter_map(|index| bounds.key_at(index as u64))
            .map(|key| self.well_at(key, bounds))
            .collect();
        let set = WellSet::from_wells(label, wells);
        tracing::trace!(label, requested = size, generated = set.len(), "generated well set");
        set
    }

    /// A plate of `kind` holding `size` random wells.
    pub fn plate<V>(
        &mut self,
        label: &str,
        kind: PlateType,
        bounds: &Bounds<V>,
        size: usize,
    ) -> Plate<V>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        let wells = self.well_set(label, bounds, size);
        Plate::new(label, kind).with_wells(wells)
    }

    /// A stack of `plates` plates labeled `Plate1`, `Plate2`, ...
    pub fn stack<V>(
        &mut self,
        label: &str,
        kind: PlateType,
        bounds: &Bounds<V>,
        wells_per_plate: usize,
        plates: usize,
    ) -> Stack<V>
    where
        V: SampleUniform + PartialOrd + Clone,
    {
        let mut stack = Stack::new(label, kind);
        for n in 1..=plates {
            let plate = self.plate(&format!("Plate{n}"), kind, bounds, wells_per_plate);
            stack.add(plate);
        }
        stack
    }
}
