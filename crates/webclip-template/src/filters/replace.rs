//! The `replace` filter.

use tracing::{debug, warn};

use super::args::{split_once_unescaped, strip_loose_quotes, unescape, RegexLiteral};
use crate::tokenizer::{split_once_top_level, split_top_level};

/// Applies `search:replacement` pairs to `input`, left to right.
///
/// `args` is a comma-separated pair list (`a:b,"c,d":e,/x+/g:y`). A search
/// written as a `/pattern/flags` literal is a regex; anything else is a literal
/// search with `\x` escapes resolved, replaced at every occurrence. An invalid
/// regex skips its pair and leaves the text as it was.
pub fn replace(input: &str, args: &str) -> String {
    split_top_level(args, ',')
        .iter()
        .fold(input.to_string(), |acc, pair| apply_pair(acc, pair))
}

fn apply_pair(acc: String, pair: &str) -> String {
    // A lone '/' opens regex mode and hides the separator; retry plainly.
    let (search, replacement) = match split_once_top_level(pair, ':') {
        (head, Some(tail)) => (head, Some(tail)),
        _ => split_once_unescaped(pair, ':'),
    };
    let search = strip_loose_quotes(search.trim());
    let replacement = replacement
        .as_deref()
        .map(|r| strip_loose_quotes(r.trim()))
        .unwrap_or_default();

    if let Some(literal) = RegexLiteral::parse(search) {
        return match literal.compile() {
            Ok(re) if literal.is_global() => re.replace_all(&acc, replacement).into_owned(),
            Ok(re) => re.replace(&acc, replacement).into_owned(),
            Err(err) => {
                warn!(error = %err, "replace: skipping invalid regex");
                acc
            }
        };
    }

    let search = unescape(search);
    let replacement = unescape(replacement);
    if search.is_empty() {
        debug!("replace: empty search string, nothing to do");
        return acc;
    }

    acc.replace(&search, &replacement)
}
