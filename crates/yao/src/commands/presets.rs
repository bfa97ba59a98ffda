//! Presets command implementation.
//!
//! Lists the built-in filter presets that configurations can reference.

use yao_filter_rs::filter::presets::PRESETS;

use super::{CommandContext, Result};
use crate::output::{format_presets_json, format_presets_table};

/// Executes the presets command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_presets_json(PRESETS)?);
    } else if !ctx.quiet {
        print!("{}", format_presets_table(PRESETS, ctx.verbose, ctx.use_colors));
    }

    Ok(())
}
