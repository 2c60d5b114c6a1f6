//! Microplate - An in-memory data model for laboratory microplates
//!
//! Wells are addressed by a row/column key (`A1`, `H12`, `AF48`) and hold an
//! ordered list of numeric values. Wells are gathered into well sets, plates
//! and stacks of plates, all kept unique by key and iterated in row-major
//! order.
//!
//! # Architecture
//!
//! - [`core`] - Keys, wells, well sets, plates, stacks and configuration
//! - [`ui`] - Text rendering and terminal output
//! - [`cli`] - The `plate` command-line tool
//!
//! # Example
//!
//! ```
//! use microplate::core::plate::{Plate, PlateType};
//! use microplate::core::well::Well;
//!
//! let mut plate: Plate<i32> = Plate::new("assay", PlateType::Wells96);
//! plate.add_wells(vec![Well::parse("B3").unwrap(), Well::parse("A1").unwrap()]).unwrap();
//!
//! let keys: Vec<String> = plate.iter().map(|w| w.index()).collect();
//! assert_eq!(keys, ["A1", "B3"]);
//! ```

pub mod cli;
pub mod core;
pub mod ui;
