//! The flat `{{name}}` variable map and its placeholder pass.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use webclip_template::render_template;

/// Variables available to a note template, keyed by name without braces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableMap {
    vars: BTreeMap<String, String>,
}

impl VariableMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over `(name, value)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces every `{{name}}` in `template` with its value.
    ///
    /// Names are matched exactly and case-sensitively. Unknown names become
    /// empty. Inserted values are not scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                break;
            };
            out.push_str(&rest[..open]);

            let name = &after_open[..close];
            match self.get(name) {
                Some(value) => out.push_str(value),
                None => debug!(name, "unknown template variable"),
            }
            rest = &after_open[close + 2..];
        }

        out.push_str(rest);
        out
    }

    /// Renders a `${...}` item template over the JSON held in `name`.
    ///
    /// This is how list variables such as `highlights` are expanded; each
    /// array element is rendered once and the results are joined with a
    /// blank line. A missing variable renders empty.
    pub fn expand(&self, name: &str, item_template: &str) -> String {
        match self.get(name) {
            Some(json) => render_template(item_template, json),
            None => {
                debug!(name, "unknown list variable");
                String::new()
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = VariableMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for VariableMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// Formats `name` as a `{{name}}` placeholder.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}
