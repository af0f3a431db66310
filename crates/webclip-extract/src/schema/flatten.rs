//! Flattening of a JSON-LD graph into `schema:` variable names.
//!
//! Nested objects extend the path with `key.`, array elements with
//! `key[i].`. Elements of a bare array start a fresh path named after their
//! `@type` (`@Article:`), one branch per type, or after their index (`[0]:`).
//! Every object also gets an entry holding its full JSON.

use serde_json::Value;
use tracing::debug;

/// Objects and arrays nested deeper than this are not flattened.
const MAX_FLATTEN_DEPTH: usize = 256;

enum Work<'a> {
    Node(&'a Value, String, usize),
    Property(&'a str, &'a Value, String, usize),
}

/// Flattens `graph` into `(name, value)` pairs in depth-first order.
///
/// Names carry the `schema:` namespace, e.g. `schema:@Article:author.name`.
/// Later pairs win when names repeat.
pub fn flatten_schema(graph: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut stack = vec![Work::Node(graph, String::new(), 0)];

    while let Some(work) = stack.pop() {
        match work {
            Work::Node(_, prefix, depth) if depth > MAX_FLATTEN_DEPTH => {
                debug!(prefix = %prefix, "schema flatten depth limit reached");
            }
            Work::Node(node, prefix, depth) => match node {
                Value::Array(items) => {
                    let mut branches = Vec::new();
                    for (index, item) in items.iter().enumerate() {
                        for prefix in element_prefixes(item, index) {
                            branches.push(Work::Node(item, prefix, depth + 1));
                        }
                    }
                    stack.extend(branches.into_iter().rev());
                }
                Value::Object(map) => {
                    let own_name = prefix.strip_suffix('.').unwrap_or(&prefix);
                    out.push((format!("schema:{own_name}"), node.to_string()));

                    let properties: Vec<Work<'_>> = map
                        .iter()
                        .filter(|(key, _)| key.as_str() != "@type")
                        .map(|(key, value)| Work::Property(key, value, prefix.clone(), depth))
                        .collect();
                    stack.extend(properties.into_iter().rev());
                }
                _ => {}
            },
            Work::Property(key, value, prefix, depth) => {
                let name = format!("schema:{prefix}{key}");
                match value {
                    Value::String(s) => out.push((name, s.clone())),
                    Value::Number(_) | Value::Bool(_) => out.push((name, value.to_string())),
                    Value::Array(items) => {
                        out.push((name, value.to_string()));
                        let elements: Vec<Work<'_>> = items
                            .iter()
                            .enumerate()
                            .map(|(i, item)| Work::Node(item, format!("{prefix}{key}[{i}]."), depth + 1))
                            .collect();
                        stack.extend(elements.into_iter().rev());
                    }
                    Value::Object(_) => {
                        stack.push(Work::Node(value, format!("{prefix}{key}."), depth + 1))
                    }
                    Value::Null => {}
                }
            }
        }
    }

    out
}

fn element_prefixes(item: &Value, index: usize) -> Vec<String> {
    match item.get("@type") {
        Some(Value::Array(types)) => types.iter().map(|t| format!("@{}:", type_name(t))).collect(),
        Some(t) if is_truthy(t) => vec![format!("@{}:", type_name(t))],
        _ => vec![format!("[{index}]:")],
    }
}

fn type_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
