//! Render command implementation.
//!
//! Builds a page's variables and fills a whole-note template with them.

use std::path::Path;

use super::inputs::read_file;
use super::vars::build_variables;
use super::{CommandContext, Result};
use crate::cli::PageArgs;
use crate::output::format_rendered_note_json;

/// Executes the render command.
pub async fn execute(ctx: &CommandContext, args: &PageArgs, template: &Path) -> Result<()> {
    let (page, template) = tokio::try_join!(build_variables(ctx, args), read_file(template))?;
    let note = page.variables.render(&template);

    if ctx.json_output {
        println!("{}", format_rendered_note_json(&page.note_name, &note)?);
    } else {
        print!("{note}");
        if !note.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
