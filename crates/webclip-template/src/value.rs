//! Values flowing through a filter chain.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// The value handed from one filter to the next.
///
/// Filters accept text, JSON arrays and JSON objects. Text that happens to be
/// JSON stays text until a filter asks for its items through
/// [`FilterValue::into_items`], which applies the "parse as JSON, else treat as
/// a single item" rule in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Plain text, possibly holding serialized JSON.
    Text(String),
    /// A JSON array.
    Array(Vec<Value>),
    /// A JSON object.
    Object(Map<String, Value>),
}

impl FilterValue {
    /// Converts a resolved JSON value into a filter value.
    ///
    /// Scalars become text using their JSON rendering (`null`, `true`, `42`).
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => FilterValue::Text(s),
            Value::Array(items) => FilterValue::Array(items),
            Value::Object(map) => FilterValue::Object(map),
            other => FilterValue::Text(other.to_string()),
        }
    }

    /// Returns the value as text for filters that operate on strings.
    ///
    /// Arrays and objects are serialized as JSON.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FilterValue::Text(s) => Cow::Borrowed(s),
            FilterValue::Array(items) => Cow::Owned(Value::from(items.clone()).to_string()),
            FilterValue::Object(map) => Cow::Owned(Value::Object(map.clone()).to_string()),
        }
    }

    /// Consumes the value, returning its text form (see [`as_text`](Self::as_text)).
    pub fn into_text(self) -> String {
        match self {
            FilterValue::Text(s) => s,
            other => other.as_text().into_owned(),
        }
    }

    /// Normalizes the value into a list of items.
    ///
    /// Text is parsed as JSON: an array yields its elements, any other JSON
    /// value yields itself, and unparseable text yields one string item.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            FilterValue::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Array(items)) => items,
                Ok(other) => vec![other],
                Err(_) => vec![Value::String(text)],
            },
            FilterValue::Array(items) => items,
            FilterValue::Object(map) => vec![Value::Object(map)],
        }
    }

    /// Renders the value for embedding into surrounding template text.
    ///
    /// Arrays join their elements with `,`; objects render as JSON.
    pub fn render(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Array(items) => items
                .iter()
                .map(display_item)
                .collect::<Vec<_>>()
                .join(","),
            FilterValue::Object(map) => Value::Object(map.clone()).to_string(),
        }
    }
}

/// Renders a single JSON item the way string coercion would: strings bare,
/// `null` empty, everything else as JSON.
pub(crate) fn display_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        FilterValue::from_json(value)
    }
}
