//! Error types for filter parsing and execution.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing or running a filter chain.
///
/// None of these abort a template render: parse errors drop the offending
/// filter from the chain, and runtime errors make the filter pass its input
/// through unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A chain segment has no filter name (e.g. `text::indent`).
    #[error("filter name is empty")]
    EmptyFilterName,

    /// The filter name is not registered.
    #[error("unknown filter: {name}{}", did_you_mean(.suggestion))]
    UnknownFilter {
        /// The unrecognized name.
        name: String,
        /// The closest registered name, if any is close enough.
        suggestion: Option<String>,
    },

    /// The argument list of a filter was never closed.
    #[error("unclosed parenthesis in arguments of '{filter}'")]
    UnclosedParenthesis {
        /// The filter whose arguments were unbalanced.
        filter: String,
    },

    /// Text followed the closing parenthesis of a filter's arguments.
    #[error("unexpected input after arguments of '{filter}': {rest}")]
    TrailingInput {
        /// The filter being parsed.
        filter: String,
        /// The leftover text.
        rest: String,
    },

    /// A `/pattern/flags` literal could not be compiled.
    #[error("invalid regex /{pattern}/: {message}")]
    InvalidRegex {
        /// The pattern source.
        pattern: String,
        /// The compiler's message.
        message: String,
    },

    /// A CSS selector could not be parsed.
    #[error("invalid selector: {selector}")]
    InvalidSelector {
        /// The selector source.
        selector: String,
    },

    /// An ISO-8601 duration could not be parsed.
    #[error("invalid ISO-8601 duration: {value}")]
    InvalidDuration {
        /// The rejected input.
        value: String,
    },

    /// Input that had to be JSON was not.
    #[error("invalid JSON: {message}")]
    InvalidJson {
        /// The parser's message.
        message: String,
    },
}

impl FilterError {
    /// Creates an unknown filter error.
    pub fn unknown_filter(name: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownFilter {
            name: name.into(),
            suggestion,
        }
    }

    /// Creates an invalid regex error.
    pub fn invalid_regex(pattern: impl Into<String>, message: impl ToString) -> Self {
        FilterError::InvalidRegex {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        FilterError::InvalidSelector {
            selector: selector.into(),
        }
    }

    /// Creates an invalid duration error.
    pub fn invalid_duration(value: impl Into<String>) -> Self {
        FilterError::InvalidDuration {
            value: value.into(),
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::InvalidJson {
            message: err.to_string(),
        }
    }
}
