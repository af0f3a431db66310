//! Note file names.

/// Longest file name produced, in characters.
const MAX_NAME_CHARS: usize = 245;

const FORBIDDEN: &[char] = &['#', '|', '^', '[', ']', '<', '>', ':', '"', '/', '\\', '?', '*'];

/// Turns a page title into a file name that is safe on common filesystems.
///
/// Returns `Untitled` when nothing usable is left.
pub fn sanitize_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();

    let trimmed = cleaned
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start();

    let capped: String = trimmed.chars().take(MAX_NAME_CHARS).collect();
    let capped = capped.trim_end();

    if capped.is_empty() {
        "Untitled".to_string()
    } else {
        capped.to_string()
    }
}
