//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Truncates a string to at most `max_chars` characters, marking the cut
/// with `...`.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Shows a multi-line value on one line, with newlines as `\n`.
pub fn one_line(s: &str) -> String {
    s.trim().replace('\r', "").replace('\n', "\\n")
}

/// Formats a table header.
pub fn header(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Formats a variable name.
pub fn name(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}
