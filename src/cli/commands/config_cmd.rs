//! config command - Get, set, or list configuration values

use std::collections::BTreeMap;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, FileConfig};
use crate::ui::output;

/// Every key `config get` understands, in listing order.
const KEYS: [&str; 4] = [
    "default_plate",
    "delimiter",
    "render.precision",
    "render.empty_cell",
];

/// The effective value of `key`, or `None` if it has no value.
fn value(config: &Config, key: &str) -> Result<Option<String>> {
    Ok(match key {
        "default_plate" => Some(config.default_plate().descriptor()),
        "delimiter" => Some(config.delimiter().to_string()),
        "render.precision" => config.precision().map(|p| p.to_string()),
        "render.empty_cell" => Some(config.empty_cell().to_string()),
        _ => bail!("Unknown configuration key: {key}"),
    })
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = value(&ctx.config, key)?;
    if ctx.json {
        return output::json(&value);
    }
    // A key with no value prints nothing.
    if let Some(value) = value {
        output::data(value);
    }
    Ok(())
}

/// Store `value` under `key` in `file`. Values are validated when written.
fn assign(file: &mut FileConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "default_plate" => file.default_plate = Some(value.to_string()),
        "delimiter" => file.delimiter = Some(value.to_string()),
        "render.precision" => {
            let precision = value
                .parse()
                .with_context(|| format!("Invalid precision '{value}'"))?;
            file.render.get_or_insert_with(Default::default).precision = Some(precision);
        }
        "render.empty_cell" => {
            file.render.get_or_insert_with(Default::default).empty_cell = Some(value.to_string());
        }
        _ => bail!("Unknown configuration key: {key}"),
    }
    Ok(())
}

/// Set a configuration value.
///
/// Writes to the file the configuration was loaded from, or to the
/// canonical location if none was found.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = match ctx.config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Failed to locate config file")?,
    };

    let mut file = ctx.config.file.clone();
    assign(&mut file, key, value)?;
    Config::write(&path, &file).context("Failed to write config")?;
    tracing::debug!(path = %path.display(), key, "wrote config");

    output::print(format!("Set {key} = {value}"), ctx.verbosity);
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let mut values = BTreeMap::new();
    for key in KEYS {
        values.insert(key, value(&ctx.config, key)?);
    }

    if ctx.json {
        return output::json(&serde_json::json!({
            "path": ctx.config.loaded_from(),
            "values": values,
        }));
    }

    match ctx.config.loaded_from() {
        Some(path) => output::print(format!("# Loaded from {}", path.display()), ctx.verbosity),
        None => output::print("# No config file found; showing defaults", ctx.verbosity),
    }
    for key in KEYS {
        let shown = values
            .get(key)
            .cloned()
            .flatten()
            .unwrap_or_else(|| "(not set)".to_string());
        output::data(format!("{key} = {shown}"));
    }
    Ok(())
}
