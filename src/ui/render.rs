//! ui::render
//!
//! Plain-text dumps of wells, well sets, plates and stacks.
//!
//! Every function here is a pure function of its input: no I/O, no
//! trailing newline, and wells always appear in key order.

use std::fmt::Display;

use crate::core::config::Config;
use crate::core::key::{row_label, SpatialKey};
use crate::core::plate::Plate;
use crate::core::stack::Stack;
use crate::core::well::Well;
use crate::core::well_set::WellSet;

/// Formatting knobs shared by the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Decimal places for fractional values; integers ignore it
    pub precision: Option<usize>,
    /// Grid placeholder for absent or empty wells
    pub empty_cell: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            precision: None,
            empty_cell: ".".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            precision: config.precision(),
            empty_cell: config.empty_cell().to_string(),
        }
    }
}

fn value<V: Display>(v: &V, options: &RenderOptions) -> String {
    match options.precision {
        Some(precision) => format!("{v:.precision$}"),
        None => v.to_string(),
    }
}

/// One well: `A1: 1, 2, 3`, or `A1:` when it holds nothing.
pub fn well_data<V: Display>(well: &Well<V>, options: &RenderOptions) -> String {
    if well.is_empty() {
        return format!("{}:", well.index());
    }
    let values: Vec<String> = well.data().iter().map(|v| value(v, options)).collect();
    format!("{}: {}", well.index(), values.join(", "))
}

fn well_lines<'a, V: Display + 'a>(
    wells: impl Iterator<Item = &'a Well<V>>,
    options: &RenderOptions,
) -> Vec<String> {
    wells.map(|well| well_data(well, options)).collect()
}

/// A well set: its label, then one line per well.
pub fn well_set_data<V: Display>(set: &WellSet<V>, options: &RenderOptions) -> String {
    let mut lines = vec![format!("{} ({} wells)", set.label(), set.len())];
    lines.extend(well_lines(set.iter(), options));
    lines.join("\n")
}

fn plate_header<V>(plate: &Plate<V>) -> String {
    format!(
        "{} ({}, {}x{})",
        plate.label(),
        plate.descriptor(),
        plate.rows(),
        plate.columns()
    )
}

/// A plate: header, every well, then its groups' declared extents.
pub fn plate_data<V: Display>(plate: &Plate<V>, options: &RenderOptions) -> String {
    let mut lines = vec![plate_header(plate)];
    lines.extend(well_lines(plate.iter(), options));
    if plate.group_count() > 0 {
        lines.push("Groups:".to_string());
        for group in plate.group_key_lists() {
            lines.push(format!("  {}: {}", group.label(), group));
        }
    }
    lines.join("\n")
}

/// A plate as a row-by-column matrix of each well's first value.
pub fn plate_grid<V: Display>(plate: &Plate<V>, options: &RenderOptions) -> String {
    let cell = |row: u32, column: u32| -> String {
        SpatialKey::new(row, column)
            .ok()
            .and_then(|key| plate.get_well(&key))
            .and_then(|well| well.data().first())
            .map(|v| value(v, options))
            .unwrap_or_else(|| options.empty_cell.clone())
    };

    let cells: Vec<Vec<String>> = (0..plate.rows())
        .map(|row| (1..=plate.columns()).map(|column| cell(row, column)).collect())
        .collect();

    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .chain(std::iter::once(plate.columns().to_string().len()))
        .max()
        .unwrap_or(1);
    let label_width = plate
        .rows()
        .checked_sub(1)
        .map(|last| row_label(last).len())
        .unwrap_or(1);

    let mut lines = vec![plate_header(plate)];

    let mut header = " ".repeat(label_width);
    for column in 1..=plate.columns() {
        header.push_str(&format!(" {column:>width$}"));
    }
    lines.push(header);

    for (row, row_cells) in cells.iter().enumerate() {
        let mut line = format!("{:<label_width$}", row_label(row as u32));
        for cell in row_cells {
            line.push_str(&format!(" {cell:>width$}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// A stack: header, then each plate separated by a blank line.
pub fn stack_data<V: Display>(stack: &Stack<V>, options: &RenderOptions) -> String {
    let mut sections = vec![format!(
        "{} ({}, {} plates)",
        stack.label(),
        stack.descriptor(),
        stack.len()
    )];
    sections.extend(stack.iter().map(|plate| plate_data(plate, options)));
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key_list::KeyList;
    use crate::core::plate::PlateType;

    fn key(s: &str) -> SpatialKey {
        SpatialKey::parse(s).unwrap()
    }

    fn plate() -> Plate<i32> {
        let mut plate = Plate::new("assay", PlateType::Wells6).with_wells(vec![
            Well::with_values(key("B3"), vec![10, 11]),
            Well::with_values(key("A1"), vec![1]),
            Well::new(key("A2")),
        ]);
        plate.add_groups(KeyList::parse("edge", "A1,B3", ",").unwrap());
        plate
    }

    #[test]
    fn well_lines() {
        let options = RenderOptions::default();
        assert_eq!(well_data(&Well::with_values(key("C4"), vec![1, 2]), &options), "C4: 1, 2");
        assert_eq!(well_data(&Well::<i32>::new(key("C4")), &options), "C4:");
    }

    #[test]
    fn precision_applies_to_floats_only() {
        let options = RenderOptions {
            precision: Some(2),
            ..Default::default()
        };
        assert_eq!(
            well_data(&Well::with_values(key("A1"), vec![1.5, 2.0]), &options),
            "A1: 1.50, 2.00"
        );
        assert_eq!(well_data(&Well::with_values(key("A1"), vec![7]), &options), "A1: 7");
    }

    #[test]
    fn plate_dump() {
        insta::assert_snapshot!(plate_data(&plate(), &RenderOptions::default()), @r"
        assay (6-Well, 2x3)
        A1: 1
        A2:
        B3: 10, 11
        Groups:
          edge: A1,B3
        ");
    }

    #[test]
    fn plate_grid_layout() {
        insta::assert_snapshot!(plate_grid(&plate(), &RenderOptions::default()), @r"
        assay (6-Well, 2x3)
           1  2  3
        A  1  .  .
        B  .  . 10
        ");
    }

    #[test]
    fn custom_plate_grid_uses_placeholder() {
        let plate: Plate<i32> = Plate::with_dimensions("tiny", 1, 2);
        let options = RenderOptions {
            empty_cell: "-".into(),
            ..Default::default()
        };
        insta::assert_snapshot!(plate_grid(&plate, &options), @r"
        tiny (Custom Plate: 1x2, 1x2)
          1 2
        A - -
        ");
    }

    #[test]
    fn well_set_dump() {
        let set = WellSet::from_wells("row A", plate().row(0));
        insta::assert_snapshot!(well_set_data(&set, &RenderOptions::default()), @r"
        row A (2 wells)
        A1: 1
        A2:
        ");
    }

    #[test]
    fn stack_dump() {
        let mut stack: Stack<i32> = Stack::new("run", PlateType::Wells6);
        stack.add(vec![plate(), Plate::new("blank", PlateType::Wells6)]);
        insta::assert_snapshot!(stack_data(&stack, &RenderOptions::default()), @r"
        run (6-Well, 2 plates)

        assay (6-Well, 2x3)
        A1: 1
        A2:
        B3: 10, 11
        Groups:
          edge: A1,B3

        blank (6-Well, 2x3)
        ");
    }
}
