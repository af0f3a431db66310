//! Template expression evaluator and filter pipeline for clipped notes.
//!
//! This crate implements the `${path|filter(args):filter(args)}` micro-language
//! used to format structured values (highlights, schema.org nodes, arbitrary
//! JSON) inside a note template.
//!
//! # Supported Syntax
//!
//! ## Expressions
//! - `${path}` - Resolve `path` against the current item
//! - `${a.b[0].c}` - Dot and bracket addressing into nested JSON
//! - `${path|text}` - Pipe the resolved value through a filter
//! - `${path|split(","):template("- ${str}")}` - Chain filters with `:`
//!
//! ## Filters
//! - `replace`, `replace_html_tag`, `split`, `split_items`, `template`,
//!   `wrap`, `to_html`, `to_json`, `text`, `indent`, `dur`
//!
//! # Example
//!
//! ```
//! use webclip_template::{apply_filters, render_template, FilterValue};
//!
//! let out = render_template("Hi ${name|replace(world:there)}", r#"{"name": "world"}"#);
//! assert_eq!(out, "Hi there");
//!
//! let parts = apply_filters(FilterValue::from("a,b,c"), "split(\",\")");
//! assert_eq!(parts.render(), r#"["a","b","c"]"#);
//! ```

mod error;
mod evaluator;
pub mod filters;
pub mod html;
mod path;
mod tokenizer;
mod value;

pub use error::{FilterError, FilterResult};
pub use evaluator::{render_template, render_value, TemplateEvaluator};
pub use filters::{apply_filters, Filter, FilterCall, FilterChain, ParsedChain};
pub use path::resolve_path;
pub use tokenizer::{split_top_level, ParserState};
pub use value::FilterValue;
