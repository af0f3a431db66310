//! Cache keys for schema property lookups.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::Value;

/// Hashes a JSON value by structure without serializing it.
///
/// Object keys are hashed in their stored order.
pub fn structural_hash(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut stack = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::Null => 0u8.hash(&mut hasher),
            Value::Bool(b) => {
                1u8.hash(&mut hasher);
                b.hash(&mut hasher);
            }
            Value::Number(n) => {
                2u8.hash(&mut hasher);
                n.to_string().hash(&mut hasher);
            }
            Value::String(s) => {
                3u8.hash(&mut hasher);
                s.hash(&mut hasher);
            }
            Value::Array(items) => {
                4u8.hash(&mut hasher);
                items.len().hash(&mut hasher);
                stack.extend(items.iter().rev());
            }
            Value::Object(map) => {
                5u8.hash(&mut hasher);
                map.len().hash(&mut hasher);
                for key in map.keys() {
                    key.hash(&mut hasher);
                }
                stack.extend(map.values().rev());
            }
        }
    }

    hasher.finish()
}
