//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each handler:
//! 1. Resolves its arguments against the loaded configuration
//! 2. Calls into [`crate::core`]
//! 3. Renders and prints the result, as text or JSON

mod completion;
mod config_cmd;
mod describe;
mod generate;
mod keys;
mod types;

pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use describe::describe;
pub use generate::generate;
pub use keys::keys;
pub use types::types;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::args::{Command, ConfigAction};
use super::Context;
use crate::core::plate::PlateType;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    tracing::debug!(?command, "dispatch");
    match command {
        Command::Types => types(ctx),
        Command::Describe {
            rows,
            columns,
            kind,
        } => describe(ctx, rows.zip(columns), kind.as_deref()),
        Command::Keys {
            list,
            delimiter,
            kind,
        } => keys(ctx, &list, delimiter.as_deref(), kind.as_deref()),
        Command::Generate {
            kind,
            label,
            seed,
            values,
            min,
            max,
            wells,
            grid,
        } => generate(
            ctx,
            generate::Options {
                kind: kind.as_deref(),
                label: &label,
                seed,
                values,
                min,
                max,
                wells,
                grid,
            },
        ),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_get(ctx, &key),
            ConfigAction::Set { key, value } => config_set(ctx, &key, &value),
            ConfigAction::List => config_list(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}

/// A named plate type, or the configured default.
fn resolve_type(ctx: &Context, kind: Option<&str>) -> Result<PlateType> {
    match kind {
        Some(name) => name
            .parse::<PlateType>()
            .with_context(|| format!("Invalid plate type '{name}'")),
        None => Ok(ctx.config.default_plate()),
    }
}

/// One plate format as reported by `types` and `describe`.
#[derive(Debug, Serialize)]
struct TypeSummary {
    descriptor: String,
    rows: u32,
    columns: u32,
    wells: u64,
    custom: bool,
}

impl From<PlateType> for TypeSummary {
    fn from(kind: PlateType) -> Self {
        Self {
            descriptor: kind.descriptor(),
            rows: kind.rows(),
            columns: kind.columns(),
            wells: kind.capacity(),
            custom: kind.is_custom(),
        }
    }
}
