//! Expansion of `${path|filters}` expressions against a data context.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::filters::{apply_filters, strip_matching_quotes};
use crate::path::resolve_path;
use crate::tokenizer::ParserState;
use crate::value::FilterValue;

/// `key: value` pairs inside a loosely formatted string item.
static LOOSE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+):\s*("(?:\\.|[^"\\])*"|[^,}]+)"#).expect("valid loose field regex")
});

/// The key under which a string item keeps its original text.
const RAW_STRING_KEY: &str = "str";

/// A parsed `${...}` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Expression<'a> {
    path: &'a str,
    filters: Option<&'a str>,
}

/// Renders one template once per item of a context.
///
/// The context is normalized to a list of items (see
/// [`FilterValue::into_items`]). Each item is rendered separately, cleaned up
/// and the results are joined with a blank line, empty ones included.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEvaluator<'t> {
    template: &'t str,
}

impl<'t> TemplateEvaluator<'t> {
    /// Creates an evaluator for `template`.
    pub fn new(template: &'t str) -> Self {
        Self { template }
    }

    /// Renders the template against every item of `context`.
    pub fn render(&self, context: FilterValue) -> String {
        context
            .into_items()
            .iter()
            .map(|item| self.render_item(item))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders the template against a single item.
    ///
    /// A string item is read as loose `key: value` pairs and also exposed
    /// whole as `${str}`.
    pub fn render_item(&self, item: &Value) -> String {
        let context = match item {
            Value::String(raw) => Cow::Owned(Value::Object(loose_object(raw))),
            other => Cow::Borrowed(other),
        };
        clean_up(&self.substitute(&context))
    }

    fn substitute(&self, context: &Value) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let body = &rest[start + 2..];
            match parse_expression(body) {
                Some((expr, consumed)) => {
                    out.push_str(&evaluate(expr, context));
                    rest = &body[consumed..];
                }
                None => {
                    out.push_str("${");
                    rest = body;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Renders `template` against a context given as text.
///
/// Text that parses as JSON is used as JSON; anything else is a single
/// string item.
pub fn render_template(template: &str, context: &str) -> String {
    TemplateEvaluator::new(template).render(FilterValue::Text(context.to_string()))
}

/// Renders `template` against a JSON context.
pub fn render_value(template: &str, context: &Value) -> String {
    TemplateEvaluator::new(template).render(FilterValue::from_json(context.clone()))
}

/// Parses the text after `${`, returning the expression and the number of
/// bytes it spans including the closing `}`.
fn parse_expression(body: &str) -> Option<(Expression<'_>, usize)> {
    let path_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']')))
        .unwrap_or(body.len());
    if path_len == 0 {
        return None;
    }
    let path = &body[..path_len];

    match body[path_len..].chars().next()? {
        '}' => Some((Expression { path, filters: None }, path_len + 1)),
        '|' => {
            let chain_start = path_len + 1;
            let chain = &body[chain_start..];
            let close = closing_brace(chain)?;
            let expr = Expression {
                path,
                filters: Some(&chain[..close]),
            };
            Some((expr, chain_start + close + 1))
        }
        _ => None,
    }
}

/// Finds the `}` that closes a filter chain, skipping braces inside quotes,
/// regex literals and argument lists. Falls back to the first `}`.
fn closing_brace(chain: &str) -> Option<usize> {
    let mut state = ParserState::new();
    for (idx, c) in chain.char_indices() {
        if c == '}' && !state.escaped && state.at_top_level() {
            return Some(idx);
        }
        state.process_char(c);
    }
    chain.find('}')
}

fn evaluate(expr: Expression<'_>, context: &Value) -> String {
    let Some(resolved) = resolve_path(context, expr.path) else {
        debug!(path = expr.path, "template path did not resolve");
        return String::new();
    };

    let value = FilterValue::from_json(resolved.clone());
    let value = match expr.filters {
        Some(chain) => apply_filters(value, chain),
        None => value,
    };

    let rendered = value.render();
    trace!(path = expr.path, rendered = %rendered, "expanded expression");
    if rendered == "undefined" {
        String::new()
    } else {
        rendered
    }
}

/// Reads `key: value, key: "quoted, value"` pairs out of a string item.
fn loose_object(raw: &str) -> Map<String, Value> {
    let mut object = Map::new();
    for caps in LOOSE_FIELD.captures_iter(raw) {
        let value = caps[2].trim();
        let value = if value.starts_with('"') {
            strip_matching_quotes(value)
        } else {
            value
        };
        if value == "undefined" {
            continue;
        }
        object.insert(caps[1].to_string(), Value::String(value.to_string()));
    }
    object.insert(RAW_STRING_KEY.to_string(), Value::String(raw.to_string()));
    object
}

/// Turns `\n` escapes into newlines, decodes entities, drops blank lines and
/// trims.
fn clean_up(rendered: &str) -> String {
    let unescaped = rendered.replace("\\n", "\n");
    let decoded = html_escape::decode_html_entities(&unescaped);
    decoded
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
