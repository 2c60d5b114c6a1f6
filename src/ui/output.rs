//! ui::output
//!
//! Terminal output for the `plate` binary.
//!
//! Human-readable output respects `--quiet`. With `--json`, commands print
//! a single JSON document through [`json`] instead.

use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only errors and requested data
    Quiet,
    Normal,
    /// Normal output plus diagnostic logging
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default `tracing` filter for this verbosity when `RUST_LOG` is unset.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Debug => "microplate=debug",
            Verbosity::Normal | Verbosity::Quiet => "warn",
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{message}");
    }
}

/// Print requested data. Always shown, quiet or not.
pub fn data(message: impl Display) {
    println!("{message}");
}

/// Print a value as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {message}");
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {message}");
    }
}
