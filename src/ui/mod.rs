//! ui
//!
//! Everything that turns engine state into text.
//!
//! # Modules
//!
//! - [`render`] - Pure plate, stack and well-set dumps
//! - [`output`] - Verbosity-aware terminal output
//!
//! The engine in [`crate::core`] never prints; callers hand its values to
//! [`render`] and print the result through [`output`].

pub mod output;
pub mod render;
