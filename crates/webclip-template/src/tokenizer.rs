//! Character scanner for filter argument lists.
//!
//! Filter arguments may contain quoted strings, `/regex/` literals and nested
//! parentheses or braces. [`ParserState`] tracks that nesting one character at
//! a time so callers can find separators that sit at the top level only.

/// Scanner state for a single argument-list parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Characters accumulated since the last separator.
    pub current: String,
    /// Inside a `'...'` or `"..."` string.
    pub in_quote: bool,
    /// The quote character that opened the current string.
    pub quote_char: char,
    /// Inside a `/.../` regex literal.
    pub in_regex: bool,
    /// Depth of unclosed `{`.
    pub curly_depth: usize,
    /// Depth of unclosed `(`.
    pub paren_depth: usize,
    /// The previous character was an unconsumed backslash.
    pub escaped: bool,
}

impl ParserState {
    /// Creates an empty scanner state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no quote, regex or bracket is open.
    pub fn at_top_level(&self) -> bool {
        !self.in_quote && !self.in_regex && self.curly_depth == 0 && self.paren_depth == 0
    }

    /// Returns true when `c` would act as a top-level separator right now.
    pub fn is_separator(&self, c: char, separator: char) -> bool {
        c == separator && !self.escaped && self.at_top_level()
    }

    /// Consumes one character, appending it to `current` and updating nesting.
    pub fn process_char(&mut self, c: char) {
        self.current.push(c);

        if self.escaped {
            self.escaped = false;
            return;
        }
        if c == '\\' {
            self.escaped = true;
            return;
        }

        if self.in_quote {
            if c == self.quote_char {
                self.in_quote = false;
            }
            return;
        }

        if self.in_regex {
            if c == '/' {
                self.in_regex = false;
            }
            return;
        }

        match c {
            '"' | '\'' => {
                self.in_quote = true;
                self.quote_char = c;
            }
            '/' if self.regex_may_start() => self.in_regex = true,
            '{' => self.curly_depth += 1,
            '}' => self.curly_depth = self.curly_depth.saturating_sub(1),
            '(' => self.paren_depth += 1,
            ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Takes the accumulated text, leaving nesting state untouched.
    pub fn take_current(&mut self) -> String {
        std::mem::take(&mut self.current)
    }

    // The '/' just pushed opens a regex only at the start of an argument or
    // right after a `:` or `,` separator.
    fn regex_may_start(&self) -> bool {
        let before = &self.current[..self.current.len() - 1];
        match before.trim_end().chars().last() {
            None => true,
            Some(prev) => matches!(prev, ':' | ','),
        }
    }
}

/// Splits `input` on `separator` wherever it appears at the top level.
///
/// Each part is trimmed. A trailing empty part is dropped, so `"a,b,"`
/// yields two parts.
pub fn split_top_level(input: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut state = ParserState::new();

    for c in input.chars() {
        if state.is_separator(c, separator) {
            parts.push(state.take_current().trim().to_string());
        } else {
            state.process_char(c);
        }
    }

    if !state.current.trim().is_empty() {
        parts.push(state.current.trim().to_string());
    }

    parts
}

/// Splits `input` at the first top-level `separator` into a head and tail.
pub fn split_once_top_level(input: &str, separator: char) -> (String, Option<String>) {
    let mut state = ParserState::new();

    for (idx, c) in input.char_indices() {
        if state.is_separator(c, separator) {
            let rest = &input[idx + c.len_utf8()..];
            return (state.take_current(), Some(rest.to_string()));
        }
        state.process_char(c);
    }

    (state.take_current(), None)
}
