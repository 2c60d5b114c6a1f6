//! describe command - Resolve a plate type from dimensions or a name

use anyhow::Result;

use super::{resolve_type, TypeSummary};
use crate::cli::Context;
use crate::core::plate::PlateType;
use crate::ui::output;

/// Describe the plate type for `dimensions`, or for `kind`, or the default.
pub fn describe(ctx: &Context, dimensions: Option<(u32, u32)>, kind: Option<&str>) -> Result<()> {
    let kind = match dimensions {
        Some((rows, columns)) => PlateType::from_dimensions(rows, columns),
        None => resolve_type(ctx, kind)?,
    };
    tracing::debug!(%kind, "resolved plate type");

    let summary = TypeSummary::from(kind);
    if ctx.json {
        return output::json(&summary);
    }

    output::data(&summary.descriptor);
    output::print(
        format!(
            "{} rows x {} columns, {} wells",
            summary.rows, summary.columns, summary.wells
        ),
        ctx.verbosity,
    );
    Ok(())
}
