//! Argument-string helpers shared by the filters.

use regex::{Regex, RegexBuilder};

use crate::error::{FilterError, FilterResult};

/// Removes one layer of enclosing parentheses: `(a,b)` -> `a,b`.
pub fn strip_parens(arg: &str) -> &str {
    arg.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(arg)
}

/// Removes one layer of matching enclosing quotes: `"x"` -> `x`, `'x'` -> `x`.
pub fn strip_matching_quotes(arg: &str) -> &str {
    for quote in ['"', '\''] {
        if arg.len() >= 2 && arg.starts_with(quote) && arg.ends_with(quote) {
            return &arg[1..arg.len() - 1];
        }
    }
    arg
}

/// Removes a leading and a trailing quote independently of each other.
///
/// Used on the halves of `search:replace` pairs, where each half may carry
/// only one of the two quotes after splitting.
pub fn strip_loose_quotes(arg: &str) -> &str {
    let arg = arg.strip_prefix(['"', '\'']).unwrap_or(arg);
    arg.strip_suffix(['"', '\'']).unwrap_or(arg)
}

/// Replaces every `\x` escape with `x`.
pub fn unescape(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Splits at the first `separator` not preceded by a backslash.
pub fn split_once_unescaped(arg: &str, separator: char) -> (String, Option<String>) {
    let mut escaped = false;
    for (idx, c) in arg.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            let rest = &arg[idx + c.len_utf8()..];
            return (arg[..idx].to_string(), Some(rest.to_string()));
        }
    }
    (arg.to_string(), None)
}

/// A `/pattern/flags` literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral<'a> {
    /// The pattern between the slashes.
    pub pattern: &'a str,
    /// The trailing flag characters.
    pub flags: &'a str,
}

impl<'a> RegexLiteral<'a> {
    /// Parses `/pattern/flags`, accepting the flags `g`, `i`, `m`, `s`, `u`, `y`.
    pub fn parse(source: &'a str) -> Option<Self> {
        let body = source.strip_prefix('/')?;
        let close = body.rfind('/')?;
        let (pattern, flags) = (&body[..close], &body[close + 1..]);
        if flags.chars().all(|f| "gimsuy".contains(f)) {
            Some(Self { pattern, flags })
        } else {
            None
        }
    }

    /// Whether every match should be replaced (the `g` flag).
    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }

    /// Compiles the literal, mapping `i`, `m` and `s` onto builder options.
    pub fn compile(&self) -> FilterResult<Regex> {
        RegexBuilder::new(self.pattern)
            .case_insensitive(self.flags.contains('i'))
            .multi_line(self.flags.contains('m'))
            .dot_matches_new_line(self.flags.contains('s'))
            .build()
            .map_err(|e| FilterError::invalid_regex(self.pattern, e))
    }
}
