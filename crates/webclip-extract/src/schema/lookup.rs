//! Dotted-path property search over a JSON-LD graph.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::cache::structural_hash;

/// Number of `(graph, path)` results remembered across lookups.
const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(capacity) => capacity,
    None => panic!("cache capacity must be non-zero"),
};

/// Nesting beyond this depth is not searched.
const MAX_SEARCH_DEPTH: usize = 256;

type CacheKey = (u64, String);

static LOOKUP_CACHE: LazyLock<Mutex<LruCache<CacheKey, String>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(CACHE_CAPACITY)));

/// Looks up `property` (e.g. `author.name`) in a JSON-LD graph.
///
/// Arrays apply the remaining path to every element and join the non-empty
/// results with `", "`. When a key is missing the search continues through
/// the object's nested objects and arrays, returning the first hit. Returns
/// an empty string when nothing matches.
pub fn get_schema_property(graph: &Value, property: &str) -> String {
    if graph.is_null() {
        return String::new();
    }

    let key = (structural_hash(graph), property.to_string());
    if let Some(hit) = lock_cache().get(&key) {
        trace!(property, "schema lookup cache hit");
        return hit.clone();
    }

    let path: Vec<&str> = property.split('.').collect();
    let result = search(graph, &path, "", 0);
    debug!(property, result = %result, "schema lookup");

    lock_cache().put(key, result.clone());
    result
}

/// Drops every remembered lookup.
pub fn clear_schema_cache() {
    lock_cache().clear();
}

fn lock_cache() -> MutexGuard<'static, LruCache<CacheKey, String>> {
    LOOKUP_CACHE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn search(data: &Value, path: &[&str], full_path: &str, depth: usize) -> String {
    if depth > MAX_SEARCH_DEPTH {
        debug!(full_path, "schema lookup depth limit reached");
        return String::new();
    }

    match data {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let results = items.iter().map(|item| {
                // Author arrays list people; take each one's name.
                if full_path == "author.name" {
                    search(item, &["name"], "name", depth + 1)
                } else {
                    search(item, path, full_path, depth + 1)
                }
            });
            results
                .filter(|r| !r.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        }
        Value::Object(map) => search_object(map, path, full_path, depth),
        Value::Number(_) | Value::Bool(_) if path.is_empty() => data.to_string(),
        _ => String::new(),
    }
}

fn search_object(map: &Map<String, Value>, path: &[&str], full_path: &str, depth: usize) -> String {
    let Some((current, rest)) = path.split_first() else {
        return map.get("name").map(leaf_text).unwrap_or_default();
    };

    if let Some(value) = map.get(*current) {
        return search(value, rest, &join_path(full_path, current), depth + 1);
    }

    map.iter()
        .filter(|(_, value)| value.is_object() || value.is_array())
        .map(|(key, value)| search(value, path, &join_path(full_path, key), depth + 1))
        .find(|result| !result.is_empty())
        .unwrap_or_default()
}

fn join_path(full_path: &str, key: &str) -> String {
    if full_path.is_empty() {
        key.to_string()
    } else {
        format!("{full_path}.{key}")
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        _ => String::new(),
    }
}
