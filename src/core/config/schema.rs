//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! default_plate = "384"
//! delimiter = ";"
//!
//! [render]
//! precision = 3
//! empty_cell = "-"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: the default plate must name a
//! standard plate type, and the delimiter and empty-cell placeholder must be
//! non-empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::plate::PlateType;

/// The on-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Plate type used when a command does not name one (e.g. "96")
    pub default_plate: Option<String>,

    /// Delimiter for key lists given on the command line
    pub delimiter: Option<String>,

    /// Text rendering settings
    pub render: Option<RenderConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(plate) = &self.default_plate {
            plate.parse::<PlateType>().map_err(|e| {
                ConfigError::InvalidValue(format!("invalid default_plate: {e}"))
            })?;
        }

        if let Some(delimiter) = &self.delimiter {
            if delimiter.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "delimiter cannot be empty".to_string(),
                ));
            }
        }

        if let Some(render) = &self.render {
            render.validate()?;
        }

        Ok(())
    }
}

/// Text rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Decimal places for fractional payloads
    pub precision: Option<usize>,

    /// Grid placeholder for absent wells
    pub empty_cell: Option<String>,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cell) = &self.empty_cell {
            if cell.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "render.empty_cell cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
