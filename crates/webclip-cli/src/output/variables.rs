//! Variable map output formatting.

use serde::Serialize;
use webclip_extract::{PageVariables, VariableMap};

use super::helpers::{header, name, one_line, truncate_str};

/// Longest value shown in the table unless verbose.
const MAX_VALUE_CHARS: usize = 80;

/// JSON output structure for the vars command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesOutput<'a> {
    pub note_name: &'a str,
    pub variables: &'a VariableMap,
}

/// JSON output structure for the render command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNoteOutput<'a> {
    pub note_name: &'a str,
    pub content: &'a str,
}

/// Formats page variables as JSON.
pub fn format_variables_json(page: &PageVariables) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&VariablesOutput {
        note_name: &page.note_name,
        variables: &page.variables,
    })
}

/// Formats page variables as a two-column table sorted by name.
///
/// Values are shown on one line and cut to a readable width unless `full`.
pub fn format_variables_table(vars: &VariableMap, use_colors: bool, full: bool) -> String {
    if vars.is_empty() {
        return "No variables.\n".to_string();
    }

    let width = vars.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0).max(4);
    let mut output = String::new();

    output.push_str(&header(&format!("{:<width$}  {}", "Name", "Value"), use_colors));
    output.push('\n');

    for (var, value) in vars.iter() {
        let value = one_line(value);
        let value = if full { value } else { truncate_str(&value, MAX_VALUE_CHARS) };
        let padding = " ".repeat(width - var.chars().count());
        output.push_str(&format!("{}{padding}  {value}\n", name(var, use_colors)));
    }

    output
}

/// Formats a rendered note as JSON.
pub fn format_rendered_note_json(note_name: &str, content: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RenderedNoteOutput { note_name, content })
}
