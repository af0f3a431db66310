//! Filters that work on HTML: `replace_html_tag`, `to_json`, `to_html`, `text`.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node, Selector};
use serde_json::{json, Map, Value};
use tracing::warn;

use super::args::strip_loose_quotes;
use crate::error::{FilterError, FilterResult};
use crate::html::{parse_fragment, serialize_children, text_content};
use crate::tokenizer::split_top_level;
use crate::value::{display_item, FilterValue};

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.:\-]*$").expect("valid tag name regex"));

/// Renames every element matching a selector, pair by pair.
///
/// Pairs are `selector:tag`, comma separated. The tag is taken after the last
/// top-level colon so selectors like `a:not(.x)` survive. Renamed elements
/// lose their attributes and keep their content. A pair with an invalid
/// selector or tag name is skipped.
pub fn replace_html_tag(html: &str, args: &str) -> String {
    let mut current = html.to_string();

    for pair in split_top_level(args, ',') {
        let parts = split_top_level(&pair, ':');
        let Some((tag, selector_parts)) = parts.split_last() else {
            continue;
        };
        if selector_parts.is_empty() {
            continue;
        }

        let tag = strip_loose_quotes(tag);
        let selector = selector_parts.join(":");
        let selector = strip_loose_quotes(&selector);

        if !TAG_NAME.is_match(tag) {
            warn!(tag, "replace_html_tag: skipping invalid tag name");
            continue;
        }
        match parse_selector(selector) {
            Ok(selector) => current = rename_matching(&current, &selector, tag),
            Err(err) => warn!(error = %err, "replace_html_tag: skipping pair"),
        }
    }

    current
}

fn parse_selector(selector: &str) -> FilterResult<Selector> {
    Selector::parse(selector).map_err(|_| FilterError::invalid_selector(selector))
}

fn rename_matching(html: &str, selector: &Selector, tag: &str) -> String {
    let fragment = parse_fragment(html);
    let root = fragment.root_element();
    serialize_children(root, &|element| {
        (element.id() != root.id() && selector.matches(&element)).then(|| tag.to_string())
    })
}

/// Converts an HTML fragment into a JSON node tree.
///
/// Elements become `{"<tag>": [children], "attributes": {..}}`, non-blank
/// text becomes `{"text": "<trimmed>"}`.
pub fn to_json(html: &str) -> String {
    let fragment = parse_fragment(html);
    Value::Array(children_to_json(fragment.root_element())).to_string()
}

fn children_to_json(element: ElementRef<'_>) -> Vec<Value> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| json!({ "text": trimmed }))
            }
            Node::Element(_) => ElementRef::wrap(child).map(element_to_json),
            _ => None,
        })
        .collect()
}

fn element_to_json(element: ElementRef<'_>) -> Value {
    let attributes: Map<String, Value> = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect();

    let mut node = Map::new();
    node.insert(
        element.value().name().to_lowercase(),
        Value::Array(children_to_json(element)),
    );
    node.insert("attributes".to_string(), Value::Object(attributes));
    Value::Object(node)
}

/// Converts a JSON node tree back into HTML.
///
/// Accepts the shape produced by [`to_json`]. Text input that is not JSON is
/// an error.
pub fn to_html(input: &FilterValue) -> FilterResult<String> {
    let tree = match input {
        FilterValue::Text(text) => serde_json::from_str::<Value>(text)?,
        FilterValue::Array(items) => Value::Array(items.clone()),
        FilterValue::Object(map) => Value::Object(map.clone()),
    };
    Ok(node_to_html(&tree))
}

fn node_to_html(node: &Value) -> String {
    match node {
        Value::Array(nodes) => nodes.iter().map(node_to_html).collect(),
        Value::Object(map) => object_to_html(map),
        Value::String(text) => text.clone(),
        _ => String::new(),
    }
}

fn object_to_html(map: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in map {
        match key.as_str() {
            "text" => out.push_str(&display_item(value)),
            "attributes" => {}
            tag => {
                let attributes = map
                    .get("attributes")
                    .and_then(Value::as_object)
                    .map(|attrs| {
                        attrs
                            .iter()
                            .map(|(name, value)| format!("{}=\"{}\"", name, display_item(value)))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_default();
                out.push_str(&format!("<{tag} {attributes}>{}</{tag}>", node_to_html(value)));
            }
        }
    }
    out
}

/// Strips all markup, returning the trimmed text content.
pub fn text(html: &str) -> String {
    text_content(html)
}
