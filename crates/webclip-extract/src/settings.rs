//! Settings that change how a page is turned into variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the highlighter does with a page's highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightBehavior {
    /// Highlights are marked inside the page content.
    #[default]
    HighlightInline,
    /// Highlights replace the page content.
    ReplaceContent,
    /// Highlights are ignored when clipping.
    NoHighlights,
}

impl HighlightBehavior {
    /// The configuration spelling of this behavior.
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightBehavior::HighlightInline => "highlight-inline",
            HighlightBehavior::ReplaceContent => "replace-content",
            HighlightBehavior::NoHighlights => "no-highlights",
        }
    }
}

impl fmt::Display for HighlightBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highlight-inline" => Ok(HighlightBehavior::HighlightInline),
            "replace-content" => Ok(HighlightBehavior::ReplaceContent),
            "no-highlights" => Ok(HighlightBehavior::NoHighlights),
            other => Err(format!(
                "unknown highlight behavior '{other}' (expected highlight-inline, replace-content or no-highlights)"
            )),
        }
    }
}

/// Settings consumed by [`VariableBuilder`](crate::VariableBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    /// Whether the highlighter is switched on.
    pub highlighter_enabled: bool,
    /// What to do with highlights.
    pub highlight_behavior: HighlightBehavior,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            highlighter_enabled: true,
            highlight_behavior: HighlightBehavior::default(),
        }
    }
}

impl ClipSettings {
    /// Returns true if highlights should become the note body.
    pub fn highlights_active(&self) -> bool {
        self.highlighter_enabled && self.highlight_behavior != HighlightBehavior::NoHighlights
    }
}
