//! Filter command implementation.
//!
//! Applies one filter, or a whole `:`-separated chain, to some text.

use tracing::debug;
use webclip_template::{Filter, FilterChain, FilterValue};

use super::inputs::read_text_arg;
use super::{CommandContext, Result};

/// Runs `chain` on `input`.
///
/// With `args`, `chain` must be a single filter name and `args` is its
/// argument list. Otherwise `chain` is parsed as a chain, and the first
/// segment that fails to parse is reported as an error.
pub fn run_filter(chain: &str, args: Option<&str>, input: String) -> Result<FilterValue> {
    let input = FilterValue::Text(input);

    if let Some(args) = args {
        let filter: Filter = chain.trim().parse()?;
        debug!(filter = %filter, args, "applying single filter");
        return Ok(filter.apply(input, Some(args)));
    }

    let parsed = FilterChain::parse(chain);
    if let Some(err) = parsed.errors.into_iter().next() {
        return Err(err.into());
    }
    debug!(calls = parsed.chain.calls().len(), "applying filter chain");
    Ok(parsed.chain.apply(input))
}

/// Executes the filter command.
pub async fn execute(
    ctx: &CommandContext,
    chain: &str,
    args: Option<&str>,
    input: Option<&str>,
) -> Result<()> {
    let text = read_text_arg(input).await?;
    let output = run_filter(chain, args, text)?.render();

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "output": output }))?);
    } else {
        println!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandError;

    fn run(chain: &str, args: Option<&str>, input: &str) -> Result<String> {
        run_filter(chain, args, input.to_string()).map(|v| v.render())
    }

    #[test]
    fn test_single_filter_with_args() {
        assert_eq!(run("replace", Some("(world:there)"), "hello world").unwrap(), "hello there");
    }

    #[test]
    fn test_chain() {
        assert_eq!(run("split(\",\"):wrap(a)", None, "x,y").unwrap(), r#"[{"a":"x"},{"a":"y"}]"#);
    }

    #[test]
    fn test_unknown_filter_is_error() {
        let err = run("txt", None, "x").unwrap_err();
        assert!(matches!(err, CommandError::Filter(_)));
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_unknown_single_filter_is_error() {
        assert!(run("nope", Some("(a)"), "x").is_err());
    }

    #[test]
    fn test_duration() {
        assert_eq!(run("dur", None, "PT1H2M3S").unwrap(), "01:02:03");
    }
}
