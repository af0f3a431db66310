//! Vars command implementation.
//!
//! Prints every note variable built for a saved page.

use webclip_extract::{PageVariables, VariableBuilder};

use super::inputs::load_page;
use super::{CommandContext, Result};
use crate::cli::PageArgs;
use crate::output::{format_variables_json, format_variables_table};

/// Loads the page described by `args` and builds its variables.
pub async fn build_variables(ctx: &CommandContext, args: &PageArgs) -> Result<PageVariables> {
    let page = load_page(args).await?;
    Ok(VariableBuilder::new(ctx.settings).build(&page)?)
}

/// Executes the vars command.
pub async fn execute(ctx: &CommandContext, args: &PageArgs) -> Result<()> {
    let page = build_variables(ctx, args).await?;

    if ctx.json_output {
        println!("{}", format_variables_json(&page)?);
    } else if !ctx.quiet {
        print!("{}", format_variables_table(&page.variables, ctx.use_colors, ctx.verbose));
    }

    Ok(())
}
