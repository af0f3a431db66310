//! Output formatting utilities for the clip CLI.
//!
//! - `variables` - Variable map and rendered note output
//! - [`helpers`] - Common formatting utilities (truncation, colors)

pub mod helpers;
mod variables;

pub use variables::{format_rendered_note_json, format_variables_json, format_variables_table};
