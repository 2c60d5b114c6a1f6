//! generate command - Random integer plate data

use anyhow::{bail, Result};

use super::resolve_type;
use crate::cli::Context;
use crate::core::random::{Bounds, Generator};
use crate::ui::{output, render};

/// Arguments for [`generate`].
#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub kind: Option<&'a str>,
    pub label: &'a str,
    pub seed: Option<u64>,
    pub values: usize,
    pub min: i32,
    pub max: i32,
    pub wells: Option<usize>,
    pub grid: bool,
}

/// Generate and print a random plate.
pub fn generate(ctx: &Context, options: Options<'_>) -> Result<()> {
    if options.min > options.max {
        bail!(
            "--min ({}) must not be greater than --max ({})",
            options.min,
            options.max
        );
    }

    let kind = resolve_type(ctx, options.kind)?;
    let capacity = usize::try_from(kind.capacity()).unwrap_or(usize::MAX);
    let size = options.wells.unwrap_or(capacity);
    if size > capacity {
        output::warn(
            format!("a {kind} plate holds {capacity} wells; generating {capacity}"),
            ctx.verbosity,
        );
    }

    let bounds =
        Bounds::for_type(kind, options.min..=options.max).values_per_well(options.values..=options.values);
    let mut generator = match options.seed {
        Some(seed) => Generator::seeded(seed),
        None => Generator::from_os(),
    };
    tracing::debug!(%kind, size, seed = ?options.seed, "generating plate");
    let plate = generator.plate(options.label, kind, &bounds, size);

    if ctx.json {
        return output::json(&plate);
    }

    let render_options = render::RenderOptions::from_config(&ctx.config);
    let text = if options.grid {
        render::plate_grid(&plate, &render_options)
    } else {
        render::plate_data(&plate, &render_options)
    };
    output::data(text);
    Ok(())
}
