//! Building the variable map for a clipped page.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::document::Document;
use crate::error::{ExtractError, ExtractResult};
use crate::highlights::{highlight_timestamp, Highlight, HighlightData};
use crate::markdown::{MarkdownConverter, PlainMarkdownConverter};
use crate::names::sanitize_file_name;
use crate::schema::{flatten_schema, get_schema_property};
use crate::settings::ClipSettings;
use crate::variables::VariableMap;

static TEXT_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#:~:text=[^&]+(&|$)").expect("valid text fragment regex"));

/// Format of `{{date}}` and `{{time}}`.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// The main content extracted from a page by a readability pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Cleaned article HTML.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Everything known about a page before its variables are built.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// The page HTML.
    pub html: String,
    /// The address the page was loaded from.
    pub url: String,
    /// Readability output, if extraction succeeded.
    pub article: Option<Article>,
    /// The page's JSON-LD graph.
    pub schema: Option<Value>,
    pub highlights: Vec<Highlight>,
    /// HTML the user selected, if any.
    pub selected_html: String,
    /// Extra variables supplied by the caller, copied as they are.
    pub extracted: BTreeMap<String, String>,
    /// The untouched page HTML, used when the body is empty.
    pub full_html: String,
}

impl PageContent {
    /// Creates page content from HTML and its URL.
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            full_html: html.clone(),
            html,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_article(mut self, article: Article) -> Self {
        self.article = Some(article);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_highlights(mut self, highlights: Vec<Highlight>) -> Self {
        self.highlights = highlights;
        self
    }

    pub fn with_selection(mut self, selected_html: impl Into<String>) -> Self {
        self.selected_html = selected_html.into();
        self
    }

    pub fn with_extracted(mut self, extracted: BTreeMap<String, String>) -> Self {
        self.extracted = extracted;
        self
    }

    pub fn with_full_html(mut self, full_html: impl Into<String>) -> Self {
        self.full_html = full_html.into();
        self
    }
}

/// The variables of one page plus the note name derived from its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVariables {
    /// Title made safe for use as a file name.
    pub note_name: String,
    pub variables: VariableMap,
}

// ==================== Fallback chains ====================

/// One place a field's value may come from.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// `<meta ATTR="VALUE" content="...">`
    Meta(&'static str, &'static str),
    /// A schema.org property path.
    Schema(&'static str),
    /// The first `<time>` element.
    TimeElement,
    /// The `<title>` element.
    TitleElement,
}

use Source::{Meta, Schema, TimeElement, TitleElement};

const TITLE: &[Source] = &[
    Meta("property", "og:title"),
    Meta("name", "twitter:title"),
    Schema("headline"),
    Meta("name", "title"),
    Meta("name", "sailthru.title"),
    TitleElement,
];

const AUTHOR: &[Source] = &[
    Meta("name", "sailthru.author"),
    Schema("author.name"),
    Meta("property", "author"),
    Meta("name", "byl"),
    Meta("name", "author"),
    Meta("name", "copyright"),
    Schema("copyrightHolder.name"),
    Meta("property", "og:site_name"),
    Schema("publisher.name"),
    Schema("sourceOrganization.name"),
    Schema("isPartOf.name"),
    Meta("name", "twitter:creator"),
    Meta("name", "application-name"),
];

const DESCRIPTION: &[Source] = &[
    Meta("name", "description"),
    Meta("property", "description"),
    Meta("property", "og:description"),
    Schema("description"),
    Meta("name", "twitter:description"),
    Meta("name", "sailthru.description"),
];

const IMAGE: &[Source] = &[
    Meta("property", "og:image"),
    Meta("name", "twitter:image"),
    Schema("image.url"),
    Meta("name", "sailthru.image.full"),
];

const PUBLISHED: &[Source] = &[
    Schema("datePublished"),
    Meta("property", "article:published_time"),
    TimeElement,
    Meta("name", "sailthru.date"),
];

const SITE: &[Source] = &[
    Schema("publisher.name"),
    Meta("property", "og:site_name"),
    Schema("sourceOrganization.name"),
    Meta("name", "copyright"),
    Schema("copyrightHolder.name"),
    Schema("isPartOf.name"),
    Meta("name", "application-name"),
];

struct Sources<'a> {
    document: &'a Document,
    schema: Option<&'a Value>,
}

impl Sources<'_> {
    fn read(&self, source: Source) -> String {
        match source {
            Meta(attr, value) => self.document.meta_content(attr, value),
            Schema(path) => self
                .schema
                .map(|graph| get_schema_property(graph, path))
                .unwrap_or_default(),
            TimeElement => self.document.time_element(),
            TitleElement => self.document.title(),
        }
    }

    /// Returns the first non-empty value, trimmed.
    fn first(&self, field: &str, chain: &[Source]) -> String {
        for source in chain {
            let value = self.read(*source);
            let value = value.trim();
            if !value.is_empty() {
                debug!(field, ?source, value, "resolved");
                return value.to_string();
            }
        }
        debug!(field, "no source provided a value");
        String::new()
    }
}

// ==================== Builder ====================

/// Builds [`PageVariables`] from [`PageContent`].
pub struct VariableBuilder {
    settings: ClipSettings,
    now: Option<DateTime<FixedOffset>>,
    converter: Box<dyn MarkdownConverter>,
}

impl Default for VariableBuilder {
    fn default() -> Self {
        Self::new(ClipSettings::default())
    }
}

impl VariableBuilder {
    /// Creates a builder using the bundled Markdown converter and the
    /// system clock.
    pub fn new(settings: ClipSettings) -> Self {
        Self {
            settings,
            now: None,
            converter: Box::new(PlainMarkdownConverter),
        }
    }

    /// Fixes the time used for `{{date}}` and `{{time}}`.
    pub fn with_clock(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }

    /// Replaces the Markdown converter.
    pub fn with_converter(mut self, converter: impl MarkdownConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Builds every variable for `page`.
    ///
    /// Any failure is reported as a single
    /// [`ExtractError::PageContent`]; nothing is returned partially.
    pub fn build(&self, page: &PageContent) -> ExtractResult<PageVariables> {
        self.try_build(page).map_err(|err| {
            warn!(error = %err, "page extraction failed");
            ExtractError::page_content(err)
        })
    }

    fn try_build(&self, page: &PageContent) -> ExtractResult<PageVariables> {
        let document = Document::parse(&page.html);
        let url = strip_text_fragment(&page.url);
        let parsed_url = Url::parse(&url).map_err(|source| ExtractError::InvalidUrl {
            url: url.clone(),
            source,
        })?;
        let domain = parsed_url
            .host_str()
            .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
            .unwrap_or_default();

        let sources = Sources {
            document: &document,
            schema: page.schema.as_ref(),
        };
        let title = sources.first("title", TITLE);
        let author = sources.first("author", AUTHOR);
        let description = sources.first("description", DESCRIPTION);
        let image = sources.first("image", IMAGE);
        let published = sources.first("published", PUBLISHED);
        let site = sources.first("site", SITE);
        let note_name = sanitize_file_name(&title);

        let content = self.body_content(page, &document);
        let markdown = self.converter.convert(&content, &parsed_url);

        let highlights = page
            .highlights
            .iter()
            .map(|highlight| {
                Ok(HighlightData {
                    text: self.converter.convert(&highlight.content, &parsed_url),
                    timestamp: highlight_timestamp(&highlight.id)?,
                    notes: (!highlight.notes.is_empty()).then(|| highlight.notes.clone()),
                })
            })
            .collect::<ExtractResult<Vec<_>>>()?;

        let now = self.now.unwrap_or_else(|| Local::now().into());
        let date = now.format(DATE_FORMAT).to_string();

        let mut variables = VariableMap::new();
        variables.insert("author", author);
        variables.insert("content", markdown.trim());
        variables.insert("contentHtml", content.trim());
        variables.insert("date", date.clone());
        variables.insert("time", date);
        variables.insert("description", description);
        variables.insert("domain", domain);
        variables.insert("fullHtml", page.full_html.trim());
        variables.insert("image", image);
        variables.insert("noteName", note_name.clone());
        variables.insert("published", published);
        variables.insert("site", site);
        variables.insert("title", title);
        variables.insert("url", url.trim());
        variables.insert("highlights", serde_json::to_string(&highlights)?);

        variables.extend(page.extracted.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        for tag in document.meta_tags() {
            let Some(content) = tag.content.filter(|c| !c.is_empty()) else {
                continue;
            };
            if let Some(name) = tag.name.filter(|n| !n.is_empty()) {
                variables.insert(format!("meta:name:{name}"), content.clone());
            }
            if let Some(property) = tag.property.filter(|p| !p.is_empty()) {
                variables.insert(format!("meta:property:{property}"), content);
            }
        }

        if let Some(schema) = page.schema.as_ref().filter(|s| !s.is_null()) {
            variables.extend(flatten_schema(schema));
        }

        debug!(count = variables.len(), "built page variables");
        Ok(PageVariables {
            note_name,
            variables,
        })
    }

    /// Picks the HTML that becomes the note body.
    fn body_content(&self, page: &PageContent, document: &Document) -> String {
        if self.settings.highlights_active() && !page.highlights.is_empty() {
            return page.highlights.iter().map(|h| h.content.as_str()).collect();
        }
        if !page.selected_html.is_empty() {
            return page.selected_html.clone();
        }
        if let Some(article) = page.article.as_ref().filter(|a| !a.content.is_empty()) {
            return article.content.clone();
        }
        if page.article.is_none() {
            debug!("no readability article, falling back to page body");
        }

        let body = document.body_html();
        if body.is_empty() {
            page.full_html.clone()
        } else {
            body
        }
    }
}

/// Removes a `#:~:text=` text-fragment directive from a URL.
pub fn strip_text_fragment(url: &str) -> String {
    TEXT_FRAGMENT.replace(url, "").into_owned()
}
