//! Read-only accessors over a parsed page.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

static META: LazyLock<Selector> = LazyLock::new(|| selector("meta"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));

fn selector(source: &str) -> Selector {
    Selector::parse(source).expect("static selector is valid")
}

/// One `<meta>` tag with its identifying attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    /// The `name` attribute.
    pub name: Option<String>,
    /// The `property` attribute.
    pub property: Option<String>,
    /// The `content` attribute.
    pub content: Option<String>,
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Returns the trimmed `content` of the first `<meta>` whose `attr`
    /// attribute equals `value`, ignoring case. Empty if there is none.
    pub fn meta_content(&self, attr: &str, value: &str) -> String {
        let value = value.to_lowercase();
        self.html
            .select(&META)
            .find(|el| el.value().attr(attr).is_some_and(|a| a.to_lowercase() == value))
            .and_then(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    /// Returns the first `<time>` element's `datetime`, else its text.
    pub fn time_element(&self) -> String {
        let Some(time) = self.html.select(&TIME).next() else {
            return String::new();
        };
        match time.value().attr("datetime") {
            Some(datetime) => datetime.trim().to_string(),
            None => time.text().collect::<String>().trim().to_string(),
        }
    }

    /// Returns the text of the `<title>` element.
    pub fn title(&self) -> String {
        self.html
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    /// Returns the inner HTML of `<body>`.
    pub fn body_html(&self) -> String {
        self.html
            .select(&BODY)
            .next()
            .map(|body| body.inner_html())
            .unwrap_or_default()
    }

    /// Lists every `<meta>` tag in document order.
    pub fn meta_tags(&self) -> Vec<MetaTag> {
        self.html
            .select(&META)
            .map(|el| {
                let attr = |name: &str| el.value().attr(name).map(String::from);
                MetaTag {
                    name: attr("name"),
                    property: attr("property"),
                    content: attr("content"),
                }
            })
            .collect()
    }

    /// Collects the page's embedded JSON-LD.
    ///
    /// Blocks that do not parse are skipped. One block is returned as is,
    /// several are returned as an array.
    pub fn json_ld(&self) -> Option<Value> {
        let mut blocks: Vec<Value> = self
            .html
            .select(&JSON_LD)
            .filter_map(|script| {
                let body = script.text().collect::<String>();
                match serde_json::from_str::<Value>(body.trim()) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        warn!(error = %err, "skipping unparseable JSON-LD block");
                        None
                    }
                }
            })
            .collect();

        debug!(count = blocks.len(), "found JSON-LD blocks");
        match blocks.len() {
            0 => None,
            1 => blocks.pop(),
            _ => Some(Value::Array(blocks)),
        }
    }
}
