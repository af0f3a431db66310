//! Eval command implementation.
//!
//! Runs a `${path|filter}` template against JSON or plain-text data.

use std::path::Path;

use webclip_template::render_template;

use super::inputs::{read_file, read_text_arg};
use super::{CommandContext, Result};

/// Executes the eval command.
///
/// Without `--data` the template is rendered against an empty object.
pub async fn execute(ctx: &CommandContext, template: &str, data: Option<&str>) -> Result<()> {
    let template = read_text_arg(Some(template)).await?;
    let data = match data {
        Some(data) => read_data(data).await?,
        None => "{}".to_string(),
    };

    let output = render_template(&template, data.trim_end());

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "output": output }))?);
    } else {
        println!("{output}");
    }

    Ok(())
}

/// `-` reads stdin, anything else names a file.
async fn read_data(data: &str) -> Result<String> {
    if data == "-" {
        read_text_arg(None).await
    } else {
        read_file(Path::new(data)).await
    }
}
