//! Error types for page extraction.

use thiserror::Error;

/// A specialized Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur while building the variables for a page.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        /// The parser error.
        #[source]
        source: url::ParseError,
    },

    /// A highlight identifier is not a millisecond timestamp.
    #[error("invalid highlight id '{id}': expected a millisecond timestamp")]
    InvalidHighlightId {
        /// The offending identifier.
        id: String,
    },

    /// A JSON input could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Building the page variables failed as a whole.
    #[error("unable to initialize page content: {0}")]
    PageContent(String),
}

impl ExtractError {
    /// Creates an invalid highlight id error.
    pub fn invalid_highlight_id(id: impl Into<String>) -> Self {
        ExtractError::InvalidHighlightId { id: id.into() }
    }

    /// Wraps any error as the single fatal page-content error.
    ///
    /// Already-wrapped errors are returned as they are.
    pub fn page_content(err: ExtractError) -> Self {
        match err {
            ExtractError::PageContent(_) => err,
            other => ExtractError::PageContent(other.to_string()),
        }
    }
}
