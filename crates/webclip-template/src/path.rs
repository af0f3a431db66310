//! Dot/bracket path addressing over JSON values.

use serde_json::Value;

/// Resolves `path` (e.g. `a.b[0].c`) against `root`.
///
/// Numeric segments index arrays, other segments look up object keys. Any
/// segment that cannot be followed makes the whole path unresolved.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |current, segment| match current {
            Value::Array(items) if is_index(segment) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            Value::Object(map) => map.get(segment),
            _ => None,
        })
}

fn is_index(segment: &str) -> bool {
    segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_object() {
        let data = json!({"a": {"b": {"c": "deep"}}});
        assert_eq!(resolve_path(&data, "a.b.c"), Some(&json!("deep")));
    }

    #[test]
    fn test_resolve_array_index() {
        let data = json!({"items": [{"name": "x"}, {"name": "y"}]});
        assert_eq!(resolve_path(&data, "items[1].name"), Some(&json!("y")));
        assert_eq!(resolve_path(&data, "items.0.name"), Some(&json!("x")));
    }

    #[test]
    fn test_missing_segment_is_none() {
        let data = json!({"a": {"b": 1}});
        assert_eq!(resolve_path(&data, "a.x.y"), None);
        assert_eq!(resolve_path(&data, "a.b.c"), None);
    }

    #[test]
    fn test_out_of_bounds_index_is_none() {
        let data = json!({"list": [1]});
        assert_eq!(resolve_path(&data, "list[3]"), None);
    }

    #[test]
    fn test_named_segment_on_array_is_none() {
        let data = json!({"list": [1, 2]});
        assert_eq!(resolve_path(&data, "list.first"), None);
    }

    #[test]
    fn test_empty_path_resolves_to_root() {
        let data = json!("root");
        assert_eq!(resolve_path(&data, ""), Some(&json!("root")));
    }

    #[test]
    fn test_null_value_resolves() {
        let data = json!({"a": null});
        assert_eq!(resolve_path(&data, "a"), Some(&Value::Null));
    }
}
