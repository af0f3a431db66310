//! Detached HTML fragments for the markup filters.
//!
//! Fragments are parsed with `scraper` into an owned tree that lives only for
//! the duration of one filter call. Serialization is done here rather than
//! through `ElementRef::inner_html` so elements can be renamed on the way out.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html, Node};

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// Parses an HTML fragment into a detached tree.
pub fn parse_fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

/// Returns the concatenated text of a fragment, trimmed.
pub fn text_content(html: &str) -> String {
    let fragment = parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}

/// Serializes the children of `element` back to markup.
///
/// Elements for which `rename` returns a name are written under that name,
/// without their attributes, keeping their content.
pub fn serialize_children(
    element: ElementRef<'_>,
    rename: &dyn Fn(ElementRef<'_>) -> Option<String>,
) -> String {
    let mut out = String::new();
    write_children(element, rename, &mut out);
    out
}

fn write_children(
    element: ElementRef<'_>,
    rename: &dyn Fn(ElementRef<'_>) -> Option<String>,
    out: &mut String,
) {
    let raw_text = RAW_TEXT_ELEMENTS.contains(&element.value().name());

    for child in element.children() {
        match child.value() {
            Node::Text(text) if raw_text => out.push_str(text),
            Node::Text(text) => out.push_str(&encode_text(&**text)),
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, rename, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(
    element: ElementRef<'_>,
    rename: &dyn Fn(ElementRef<'_>) -> Option<String>,
    out: &mut String,
) {
    let renamed = rename(element);
    let name = renamed.as_deref().unwrap_or(element.value().name());

    out.push('<');
    out.push_str(name);
    if renamed.is_none() {
        for (key, value) in element.value().attrs() {
            let _ = write!(out, " {}=\"{}\"", key, encode_double_quoted_attribute(value));
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    write_children(element, rename, out);
    let _ = write!(out, "</{}>", name);
}
