//! types command - List the standard plate types

use anyhow::Result;

use super::TypeSummary;
use crate::cli::Context;
use crate::core::plate::PlateType;
use crate::ui::output;

/// List every standard plate type with its dimensions.
pub fn types(ctx: &Context) -> Result<()> {
    let summaries: Vec<TypeSummary> = PlateType::standard().map(TypeSummary::from).collect();
    if ctx.json {
        return output::json(&summaries);
    }

    output::print(
        format!("{:<10} {:>4} {:>7} {:>5}", "TYPE", "ROWS", "COLUMNS", "WELLS"),
        ctx.verbosity,
    );
    for summary in &summaries {
        output::data(format!(
            "{:<10} {:>4} {:>7} {:>5}",
            summary.descriptor, summary.rows, summary.columns, summary.wells
        ));
    }
    Ok(())
}
