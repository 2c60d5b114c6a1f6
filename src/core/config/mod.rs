//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$MICROPLATE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/microplate/config.toml`
//! 3. `~/.microplate/config.toml` (canonical write location)
//!
//! A missing file is not an error; defaults apply. Command-line flags
//! override anything loaded here (not handled in this module).
//!
//! # Example
//!
//! ```no_run
//! use microplate::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Default plate: {}", config.default_plate());
//! println!("Delimiter: {:?}", config.delimiter());
//! ```

pub mod schema;

pub use schema::{FileConfig, RenderConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::plate::PlateType;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MICROPLATE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from disk
    pub file: FileConfig,
    /// Where they were read from, if anywhere
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Load configuration, resolving environment variables through `env`.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        for path in Self::search_paths(&env) {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Wrap values that did not come from disk.
    pub fn from_file(file: FileConfig) -> Self {
        Self { file, path: None }
    }

    /// Load and validate a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Candidate config files, most specific first.
    fn search_paths(env: &impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(explicit) = env(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("microplate/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".microplate/config.toml"));
        }
        paths
    }

    /// The canonical path for the config file: `~/.microplate/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".microplate/config.toml"))
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed, writes to a temp file in the
    /// same directory, then renames it into place.
    pub fn write(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// The plate type used when none is given.
    ///
    /// Defaults to 96-well. The value was validated at load time.
    pub fn default_plate(&self) -> PlateType {
        self.file
            .default_plate
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(PlateType::Wells96)
    }

    /// Delimiter for key lists. Defaults to `","`.
    pub fn delimiter(&self) -> &str {
        self.file.delimiter.as_deref().unwrap_or(",")
    }

    /// Decimal places for fractional payloads, if configured.
    pub fn precision(&self) -> Option<usize> {
        self.file.render.as_ref().and_then(|r| r.precision)
    }

    /// Grid placeholder for absent wells. Defaults to `"."`.
    pub fn empty_cell(&self) -> &str {
        self.file
            .render
            .as_ref()
            .and_then(|r| r.empty_cell.as_deref())
            .unwrap_or(".")
    }

    /// The file this configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
