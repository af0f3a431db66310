//! The `split` and `split_items` filters.

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::args::strip_matching_quotes;
use crate::value::{display_item, FilterValue};

/// Splits `input` on `separator`, returning the parts as a JSON array string.
///
/// Without a separator the whole input becomes a one-element array.
pub fn split(input: &str, separator: Option<&str>) -> String {
    let parts = match separator {
        Some(sep) => split_by(input, strip_matching_quotes(sep)),
        None => vec![input.to_string()],
    };
    Value::from(parts).to_string()
}

/// Splits every item of a JSON array by `separator`, flattening one level.
///
/// Input that is not a JSON array is treated as a single item. Without a
/// separator the items are returned as they are.
pub fn split_items(input: FilterValue, separator: Option<&str>) -> FilterValue {
    let items = input.into_items();
    let Some(sep) = separator else {
        return FilterValue::Array(items);
    };

    let sep = strip_matching_quotes(sep);
    let parts = items
        .iter()
        .flat_map(|item| split_by(&display_item(item), sep))
        .map(Value::String)
        .collect();
    FilterValue::Array(parts)
}

/// A one-character separator splits literally; longer ones are regexes.
fn split_by(input: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return input.chars().map(String::from).collect();
    }
    if separator.chars().count() == 1 {
        return input.split(separator).map(String::from).collect();
    }

    match Regex::new(separator) {
        Ok(re) => re.split(input).map(String::from).collect(),
        Err(err) => {
            warn!(separator, error = %err, "split: separator is not a valid regex, splitting literally");
            input.split(separator).map(String::from).collect()
        }
    }
}
