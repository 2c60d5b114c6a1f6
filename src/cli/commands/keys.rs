//! keys command - Parse a key list and print it in plate order

use anyhow::{Context as _, Result};

use super::resolve_type;
use crate::cli::Context;
use crate::core::key_list::KeyList;
use crate::ui::output;

/// Parse `list`, then print its keys in row-major order.
///
/// With `kind`, keys outside that plate's dimensions are reported as
/// warnings; they are still printed.
pub fn keys(ctx: &Context, list: &str, delimiter: Option<&str>, kind: Option<&str>) -> Result<()> {
    let delimiter = delimiter.unwrap_or_else(|| ctx.config.delimiter());
    let keys = KeyList::parse("keys", list, delimiter)
        .with_context(|| format!("Invalid key list '{list}'"))?;
    tracing::debug!(count = keys.len(), delimiter, "parsed keys");

    if kind.is_some() {
        let kind = resolve_type(ctx, kind)?;
        let (rows, columns) = kind.dimensions();
        for key in keys.iter().filter(|k| k.row() >= rows || k.column() > columns) {
            output::warn(format!("{key} is outside a {kind} plate"), ctx.verbosity);
        }
    }

    if ctx.json {
        return output::json(&keys.to_vec());
    }
    for key in &keys {
        output::data(key);
    }
    Ok(())
}
