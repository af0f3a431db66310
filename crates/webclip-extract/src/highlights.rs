//! Highlight records and their `{{highlights}}` rendering.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExtractError, ExtractResult};

/// A highlight made on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Highlight kind (`text`, `element`, `complex`).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Creation time in epoch milliseconds, as text.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// XPath of the highlighted node.
    #[serde(default)]
    pub xpath: String,
    /// Highlighted HTML.
    pub content: String,
    #[serde(default)]
    pub start_offset: usize,
    #[serde(default)]
    pub end_offset: usize,
    /// Notes attached to the highlight.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

fn default_kind() -> String {
    "text".to_string()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected a string or number id, got {other}"))),
    }
}

impl Highlight {
    /// Wraps bare highlighted text as a text highlight created at `now`.
    pub fn from_text<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Self {
        Self {
            kind: default_kind(),
            id: now.timestamp_millis().to_string(),
            xpath: String::new(),
            content: format!("<div>{text}</div>"),
            start_offset: 0,
            end_offset: text.encode_utf16().count(),
            notes: Vec::new(),
        }
    }
}

/// Reads a list of highlights where each entry is a record or bare text.
///
/// Anything other than a JSON array yields no highlights.
pub fn parse_highlights<Tz: TimeZone>(raw: &Value, now: &DateTime<Tz>) -> ExtractResult<Vec<Highlight>> {
    let Value::Array(entries) = raw else {
        return Ok(Vec::new());
    };

    entries
        .iter()
        .map(|entry| -> ExtractResult<Highlight> {
            match entry {
                Value::String(text) => Ok(Highlight::from_text(text, now)),
                record => Ok(Highlight::deserialize(record)?),
            }
        })
        .collect()
}

/// One entry of the `{{highlights}}` JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightData {
    /// The highlight converted to Markdown.
    pub text: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

/// Renders a highlight id (epoch milliseconds) as `2024-01-01T00:00:00.000Z`.
pub fn highlight_timestamp(id: &str) -> ExtractResult<String> {
    let millis: i64 = id
        .trim()
        .parse()
        .map_err(|_| ExtractError::invalid_highlight_id(id))?;
    let time: DateTime<Utc> =
        DateTime::from_timestamp_millis(millis).ok_or_else(|| ExtractError::invalid_highlight_id(id))?;
    Ok(time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
