//! core::key
//!
//! The spatial coordinate that identifies and orders every well.
//!
//! # Canonical form
//!
//! A key prints as `<row label><column>`, e.g. `A1` or `P24`. Row labels are
//! bijective base-26: rows `0..=25` are `A..=Z`, row 26 is `AA`, row 27 is
//! `AB`, and so on. Columns are 1-based decimal.
//!
//! # Examples
//!
//! ```
//! use microplate::core::key::SpatialKey;
//!
//! let key = SpatialKey::new(1, 12).unwrap();
//! assert_eq!(key.to_string(), "B12");
//! assert_eq!("b12".parse::<SpatialKey>().unwrap(), key);
//!
//! // Column 0 does not exist on a plate
//! assert!(SpatialKey::new(0, 0).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{PlateError, Result};

/// An immutable `(row, column)` coordinate.
///
/// Ordering is row-major: the row dominates, the column breaks ties. The
/// derived `Ord` relies on the field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpatialKey {
    row: u32,
    column: u32,
}

impl SpatialKey {
    /// Create a key from a 0-based row and a 1-based column.
    ///
    /// # Errors
    ///
    /// Returns `PlateError::InvalidCoordinate` if `column` is zero.
    pub fn new(row: u32, column: u32) -> Result<Self> {
        if column < 1 {
            return Err(PlateError::InvalidCoordinate {
                row: i64::from(row),
                column: i64::from(column),
            });
        }
        Ok(Self { row, column })
    }

    /// The 0-based row.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// The 1-based column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The alphabetic label of this key's row.
    pub fn row_label(&self) -> String {
        row_label(self.row)
    }

    /// Parse a canonical key string such as `"C7"`.
    ///
    /// Leading and trailing whitespace is ignored and row letters are
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `PlateError::Parse` for malformed input and
    /// `PlateError::InvalidCoordinate` for column 0.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        let split = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (letters, digits) = text.split_at(split);

        if letters.is_empty() {
            return Err(PlateError::parse(format!(
                "'{input}': missing row letters"
            )));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlateError::parse(format!(
                "'{input}': column must be a decimal number"
            )));
        }

        let row = parse_row_label(letters)
            .ok_or_else(|| PlateError::parse(format!("'{input}': row label out of range")))?;
        let column: u32 = digits
            .parse()
            .map_err(|_| PlateError::parse(format!("'{input}': column out of range")))?;

        Self::new(row, column)
    }
}

impl TryFrom<(i64, i64)> for SpatialKey {
    type Error = PlateError;

    fn try_from((row, column): (i64, i64)) -> Result<Self> {
        let invalid = || PlateError::InvalidCoordinate { row, column };
        let row = u32::try_from(row).map_err(|_| invalid())?;
        let column = u32::try_from(column).map_err(|_| invalid())?;
        Self::new(row, column).map_err(|_| invalid())
    }
}

impl FromStr for SpatialKey {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SpatialKey {
    type Error = PlateError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<SpatialKey> for String {
    fn from(key: SpatialKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for SpatialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", row_label(self.row), self.column)
    }
}

/// Convert a 0-based row index into its alphabetic label.
///
/// ```
/// use microplate::core::key::row_label;
///
/// assert_eq!(row_label(0), "A");
/// assert_eq!(row_label(25), "Z");
/// assert_eq!(row_label(26), "AA");
/// ```
pub fn row_label(row: u32) -> String {
    let mut n = u64::from(row) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Inverse of [`row_label`]. Returns `None` if the label overflows a `u32`
/// row or contains a non-letter.
pub fn parse_row_label(label: &str) -> Option<u32> {
    let mut n: u64 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u64::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
        if n > u64::from(u32::MAX) + 1 {
            return None;
        }
    }
    u32::try_from(n.checked_sub(1)?).ok()
}
