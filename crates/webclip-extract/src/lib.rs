//! Page metadata extraction and note variables for web clipping.
//!
//! Given a page's HTML, its URL, an optional readability article, a JSON-LD
//! graph and the user's highlights, [`VariableBuilder`] produces the flat
//! `{{name}}` map used by whole-note templates.
//!
//! # Variables
//!
//! - `{{title}}`, `{{author}}`, `{{description}}`, `{{image}}`,
//!   `{{published}}`, `{{site}}` - first non-empty value of a fixed
//!   fallback chain over meta tags, schema.org properties and the document
//! - `{{content}}`, `{{contentHtml}}`, `{{fullHtml}}` - the note body
//! - `{{url}}`, `{{domain}}`, `{{noteName}}`, `{{date}}`, `{{time}}`
//! - `{{highlights}}` - JSON array of `{text, timestamp, notes?}`
//! - `{{meta:name:X}}`, `{{meta:property:X}}`, `{{schema:Path}}`
//!
//! # Example
//!
//! ```
//! use webclip_extract::{PageContent, VariableBuilder};
//!
//! let html = r#"<html><head><meta property="og:title" content="Hello"></head>
//!     <body><p>Body text</p></body></html>"#;
//! let page = PageContent::new(html, "https://www.example.com/post");
//! let vars = VariableBuilder::default().build(&page).unwrap().variables;
//!
//! assert_eq!(vars.render("{{title}} ({{domain}})"), "Hello (example.com)");
//! ```

mod builder;
mod document;
mod error;
mod highlights;
mod markdown;
mod names;
pub mod schema;
mod settings;
mod variables;

pub use builder::{strip_text_fragment, Article, PageContent, PageVariables, VariableBuilder};
pub use document::{Document, MetaTag};
pub use error::{ExtractError, ExtractResult};
pub use highlights::{highlight_timestamp, parse_highlights, Highlight, HighlightData};
pub use markdown::{MarkdownConverter, PlainMarkdownConverter};
pub use names::sanitize_file_name;
pub use schema::{flatten_schema, get_schema_property};
pub use settings::{ClipSettings, HighlightBehavior};
pub use variables::{placeholder, VariableMap};
