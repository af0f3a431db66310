//! The filter registry and filter-chain parsing.
//!
//! A chain is written `name(args):name(args)` and split on top-level `:`.
//! Parsing never fails as a whole: a malformed or unknown segment is logged,
//! reported in [`ParsedChain::errors`] and left out of the chain. Running a
//! filter never fails either: a filter that hits an error passes its input
//! through unchanged.

mod args;
mod format;
mod markup;
mod replace;
mod split;
mod wrap;

use std::fmt;
use std::str::FromStr;

use strsim::levenshtein;
use tracing::{debug, warn};

use crate::error::{FilterError, FilterResult};
use crate::evaluator::TemplateEvaluator;
use crate::tokenizer::{split_top_level, ParserState};
use crate::value::FilterValue;

pub use args::{strip_matching_quotes, strip_parens, RegexLiteral};
pub use format::{dur, indent};
pub use markup::{replace_html_tag, text, to_html, to_json};
pub use replace::replace;
pub use split::{split, split_items};
pub use wrap::wrap;

/// Maximum edit distance for suggesting a filter name.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A registered filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// `replace(search:replacement,...)`
    Replace,
    /// `replace_html_tag(selector:tag,...)`
    ReplaceHtmlTag,
    /// `split(separator)`
    Split,
    /// `split_items(separator)`
    SplitItems,
    /// `template("...${path}...")`
    Template,
    /// `wrap(key,key,...)`
    Wrap,
    /// `to_html`
    ToHtml,
    /// `to_json`
    ToJson,
    /// `text`
    Text,
    /// `indent(level)`
    Indent,
    /// `dur`
    Dur,
}

impl Filter {
    /// Every registered filter, in registry order.
    pub const ALL: [Filter; 11] = [
        Filter::Replace,
        Filter::ReplaceHtmlTag,
        Filter::Split,
        Filter::SplitItems,
        Filter::Template,
        Filter::Wrap,
        Filter::ToHtml,
        Filter::ToJson,
        Filter::Text,
        Filter::Indent,
        Filter::Dur,
    ];

    /// The name used to invoke the filter in a chain.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Replace => "replace",
            Filter::ReplaceHtmlTag => "replace_html_tag",
            Filter::Split => "split",
            Filter::SplitItems => "split_items",
            Filter::Template => "template",
            Filter::Wrap => "wrap",
            Filter::ToHtml => "to_html",
            Filter::ToJson => "to_json",
            Filter::Text => "text",
            Filter::Indent => "indent",
            Filter::Dur => "dur",
        }
    }

    /// Runs the filter on `input`.
    ///
    /// `raw_args` is the argument list as written, parentheses included. On
    /// error the input is returned unchanged.
    pub fn apply(self, input: FilterValue, raw_args: Option<&str>) -> FilterValue {
        // Whitespace inside the parentheses is an argument (`split( )`).
        let args = raw_args
            .map(|raw| strip_parens(raw.trim()))
            .filter(|a| !a.is_empty());

        match self.try_apply(&input, args) {
            Ok(output) => output,
            Err(err) => {
                warn!(filter = self.name(), error = %err, "filter failed, passing input through");
                input
            }
        }
    }

    /// Runs the filter, surfacing errors instead of swallowing them.
    ///
    /// `args` has already been stripped of its enclosing parentheses.
    pub fn try_apply(self, input: &FilterValue, args: Option<&str>) -> FilterResult<FilterValue> {
        let output = match (self, args) {
            (Filter::Replace, Some(args)) => FilterValue::Text(replace(&input.as_text(), args)),
            (Filter::ReplaceHtmlTag, Some(args)) => {
                FilterValue::Text(replace_html_tag(&input.as_text(), args))
            }
            (Filter::Split, sep) => FilterValue::Text(split(&input.as_text(), sep)),
            (Filter::SplitItems, sep) => split_items(input.clone(), sep),
            (Filter::Template, Some(template)) => FilterValue::Text(
                TemplateEvaluator::new(strip_matching_quotes(template)).render(input.clone()),
            ),
            (Filter::Wrap, Some(keys)) => wrap(input.clone(), keys),
            (Filter::ToHtml, _) => FilterValue::Text(to_html(input)?),
            (Filter::ToJson, _) => FilterValue::Text(to_json(&input.as_text())),
            (Filter::Text, _) => FilterValue::Text(text(&input.as_text())),
            (Filter::Indent, level) => FilterValue::Text(indent(&input.as_text(), level)),
            (Filter::Dur, _) => FilterValue::Text(dur(&input.as_text())?),
            (Filter::Replace | Filter::ReplaceHtmlTag | Filter::Template | Filter::Wrap, None) => {
                debug!(filter = self.name(), "no arguments, returning input");
                input.clone()
            }
        };
        Ok(output)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == name)
            .ok_or_else(|| {
                let suggestion = find_similar_name(name, Filter::ALL.iter().map(|f| f.name()));
                FilterError::unknown_filter(name, suggestion)
            })
    }
}

/// Finds the registered name closest to `query` by Levenshtein distance.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query = query.to_lowercase();
    let (best, distance) = candidates
        .map(|name| (name, levenshtein(&query, name)))
        .min_by_key(|(_, d)| *d)?;

    (distance > 0 && distance <= MAX_SUGGESTION_DISTANCE).then(|| best.to_string())
}

/// One parsed `name(args)` segment of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCall {
    /// The filter to run.
    pub filter: Filter,
    /// The raw argument list including its parentheses, if any was written.
    pub args: Option<String>,
}

impl FilterCall {
    /// Parses a single chain segment.
    pub fn parse(segment: &str) -> FilterResult<Self> {
        let segment = segment.trim();
        let (name, args) = match segment.find('(') {
            Some(open) => (segment[..open].trim(), Some(&segment[open..])),
            None => (segment, None),
        };
        if name.is_empty() {
            return Err(FilterError::EmptyFilterName);
        }

        let filter: Filter = name.parse()?;
        if let Some(args) = args {
            check_argument_list(name, args)?;
        }

        Ok(Self {
            filter,
            args: args.map(String::from),
        })
    }

    /// Runs this call on `input`.
    pub fn apply(&self, input: FilterValue) -> FilterValue {
        self.filter.apply(input, self.args.as_deref())
    }
}

/// Verifies that `args` is one balanced `(...)` group and nothing more.
fn check_argument_list(name: &str, args: &str) -> FilterResult<()> {
    let mut state = ParserState::new();

    for (idx, c) in args.char_indices() {
        let was_open = state.paren_depth > 0;
        state.process_char(c);
        if c == ')' && was_open && state.at_top_level() {
            let rest = args[idx + 1..].trim();
            if rest.is_empty() {
                return Ok(());
            }
            return Err(FilterError::TrailingInput {
                filter: name.to_string(),
                rest: rest.to_string(),
            });
        }
    }

    Err(FilterError::UnclosedParenthesis {
        filter: name.to_string(),
    })
}

/// An ordered list of filter calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    calls: Vec<FilterCall>,
}

/// The result of parsing a chain: the usable calls plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedChain {
    /// The calls that parsed successfully, in order.
    pub chain: FilterChain,
    /// One error per dropped segment.
    pub errors: Vec<FilterError>,
}

impl FilterChain {
    /// Parses `name(args):name(args)...`, dropping segments that fail.
    pub fn parse(source: &str) -> ParsedChain {
        let mut parsed = ParsedChain::default();

        for segment in split_top_level(source, ':') {
            match FilterCall::parse(&segment) {
                Ok(call) => parsed.chain.calls.push(call),
                Err(err) => {
                    warn!(segment = %segment, error = %err, "dropping filter from chain");
                    parsed.errors.push(err);
                }
            }
        }

        parsed
    }

    /// The parsed calls, in order.
    pub fn calls(&self) -> &[FilterCall] {
        &self.calls
    }

    /// Returns true if the chain has no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Feeds `input` through every call in order.
    pub fn apply(&self, input: FilterValue) -> FilterValue {
        self.calls.iter().fold(input, |value, call| call.apply(value))
    }
}

/// Parses `chain` and applies it to `input` in one step.
pub fn apply_filters(input: FilterValue, chain: &str) -> FilterValue {
    FilterChain::parse(chain).chain.apply(input)
}

#[cfg(test)]
mod tests;
