//! The `wrap` filter.

use serde_json::{Map, Value};

use super::args::strip_matching_quotes;
use crate::tokenizer::split_top_level;
use crate::value::FilterValue;

/// Regroups a flat array into objects, cycling through `keys`.
///
/// `keys` `a,b` over `[1,2,3,4]` gives `[{"a":1,"b":2},{"a":3,"b":4}]`. Text
/// that is not JSON is wrapped as a single item. JSON that is not an array,
/// or an empty key list, is returned unchanged.
pub fn wrap(input: FilterValue, keys: &str) -> FilterValue {
    let keys: Vec<String> = split_top_level(keys, ',')
        .iter()
        .map(|k| strip_matching_quotes(k).to_string())
        .collect();
    if keys.is_empty() {
        return input;
    }

    let items = match input {
        FilterValue::Array(items) => items,
        FilterValue::Text(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => items,
            Ok(_) => return FilterValue::Text(text),
            Err(_) => vec![Value::String(text)],
        },
        other => return other,
    };

    let grouped: Vec<Value> = items
        .chunks(keys.len())
        .map(|chunk| {
            let object: Map<String, Value> = keys.iter().cloned().zip(chunk.iter().cloned()).collect();
            Value::Object(object)
        })
        .collect();

    FilterValue::Text(Value::from(grouped).to_string())
}
