//! core
//!
//! The microplate data model.
//!
//! # Modules
//!
//! - [`key`] - Row/column coordinates and their canonical strings
//! - [`well`] - A key plus an ordered list of values
//! - [`key_list`] - Labeled, ordered sets of keys (used for groups)
//! - [`well_set`] - Uniquely-keyed ordered collection of wells
//! - [`plate`] - Plate types, dimensions and named groups
//! - [`stack`] - Ordered collection of plates
//! - [`input`] - Conversions from the accepted input shapes
//! - [`random`] - Seedable random data for demos and tests
//! - [`config`] - Configuration schema and loading
//! - [`error`] - Engine error type
//!
//! # Design Principles
//!
//! - Identity and ordering come from keys only; payloads never take part
//! - Every collection iterates in ascending key order
//! - The engine is generic over the payload; aliases cover the common ones

pub mod config;
pub mod error;
pub mod input;
pub mod key;
pub mod key_list;
pub mod plate;
pub mod random;
pub mod stack;
pub mod well;
pub mod well_set;

pub use error::{PlateError, Result};
