//! HTML to Markdown conversion.
//!
//! Conversion is pluggable through [`MarkdownConverter`]. The bundled
//! [`PlainMarkdownConverter`] covers block structure, emphasis, links and
//! images, which is enough for highlights and simple article bodies.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use url::Url;

static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));
static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid trailing space regex"));

/// Converts an HTML fragment to Markdown.
pub trait MarkdownConverter: Send + Sync {
    /// Converts `html`, resolving relative links against `base_url`.
    fn convert(&self, html: &str, base_url: &Url) -> String;
}

/// A small built-in converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMarkdownConverter;

impl MarkdownConverter for PlainMarkdownConverter {
    fn convert(&self, html: &str, base_url: &Url) -> String {
        let fragment = Html::parse_fragment(html);
        let mut writer = Writer {
            out: String::new(),
            base_url,
        };
        writer.children(fragment.root_element(), false);

        let text = TRAILING_SPACE.replace_all(&writer.out, "\n");
        let text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "aside", "main", "nav", "ul", "ol",
    "table", "tr", "blockquote", "figure", "figcaption", "dl", "dt", "dd", "hr",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

struct Writer<'u> {
    out: String,
    base_url: &'u Url,
}

impl Writer<'_> {
    fn children(&mut self, element: ElementRef<'_>, pre: bool) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) if pre => self.out.push_str(text),
                Node::Text(text) => self.inline_text(text),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.element(child_element, pre);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, node: ElementRef<'_>, pre: bool) {
        let element = node.value();
        let name = element.name();
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }

        match name {
            "br" => self.out.push('\n'),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.block_break();
                self.out.push_str(&"#".repeat(level));
                self.out.push(' ');
                self.children(node, pre);
                self.block_break();
            }
            "li" => {
                self.line_break();
                self.out.push_str("- ");
                self.children(node, pre);
                self.line_break();
            }
            "pre" => {
                self.block_break();
                self.out.push_str("```\n");
                self.children(node, true);
                self.line_break();
                self.out.push_str("```");
                self.block_break();
            }
            "strong" | "b" => self.wrapped(node, "**", pre),
            "em" | "i" => self.wrapped(node, "_", pre),
            "code" if !pre => self.wrapped(node, "`", pre),
            "a" => self.link(node, element.attr("href"), pre),
            "img" => {
                if let Some(src) = element.attr("src").and_then(|s| self.resolve(s)) {
                    let alt = element.attr("alt").unwrap_or_default();
                    self.out.push_str(&format!("![{alt}]({src})"));
                }
            }
            block if BLOCK_ELEMENTS.contains(&block) => {
                self.block_break();
                if block == "blockquote" {
                    self.out.push_str("> ");
                }
                self.children(node, pre);
                self.block_break();
            }
            _ => self.children(node, pre),
        }
    }

    fn link(&mut self, node: ElementRef<'_>, href: Option<&str>, pre: bool) {
        let Some(url) = href.filter(|h| !h.starts_with('#')).and_then(|h| self.resolve(h)) else {
            self.children(node, pre);
            return;
        };
        self.out.push('[');
        self.children(node, pre);
        self.out.push_str(&format!("]({url})"));
    }

    fn wrapped(&mut self, node: ElementRef<'_>, marker: &str, pre: bool) {
        self.out.push_str(marker);
        self.children(node, pre);
        self.out.push_str(marker);
    }

    fn inline_text(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !text.is_empty() && !self.at_line_start() && !self.out.ends_with(' ') {
                self.out.push(' ');
            }
            return;
        }
        if text.starts_with(char::is_whitespace) && !self.at_line_start() && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
        self.out.push_str(&collapsed);
        if text.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
    }

    fn resolve(&self, href: &str) -> Option<String> {
        let url = self.base_url.join(href).ok()?;
        match url.scheme() {
            "http" | "https" | "mailto" | "ftp" | "file" => Some(url.to_string()),
            _ => None,
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n') || self.out.ends_with("> ") || self.out.ends_with("- ")
    }

    fn line_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn block_break(&mut self) {
        if self.out.is_empty() {
            return;
        }
        self.line_break();
        if !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}
