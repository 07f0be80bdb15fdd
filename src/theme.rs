//! Theme registry for bundled layout templates.
//!
//! Themes are named HTML templates embedded in the binary and registered
//! once at construction; the set is immutable afterwards. A caller-supplied
//! custom template always wins over theme lookup, and an unknown theme name
//! degrades to the default theme with a warning rather than an error:
//! themes are presentation, not correctness.

use log::warn;
use std::collections::HashMap;

/// Name of the theme used when an unknown theme is requested.
pub const DEFAULT_THEME: &str = "default";

const DEFAULT_TEMPLATE: &str = include_str!("../themes/default.html");
const MINIMAL_TEMPLATE: &str = include_str!("../themes/minimal.html");

/// Registry of bundled themes.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: HashMap<&'static str, &'static str>,
}

impl ThemeRegistry {
    /// Create a registry with the bundled themes.
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert("default", DEFAULT_TEMPLATE);
        themes.insert("minimal", MINIMAL_TEMPLATE);
        Self { themes }
    }

    /// Resolve a theme name and optional custom template to template text.
    ///
    /// A non-empty `custom_template` is returned verbatim, bypassing theme
    /// lookup entirely. Otherwise the named theme is looked up; unknown
    /// names fall back to [`DEFAULT_THEME`] and log a warning naming the
    /// offending value and the valid alternatives.
    pub fn resolve<'a>(&'a self, name: &str, custom_template: Option<&'a str>) -> &'a str {
        if let Some(template) = custom_template {
            if !template.trim().is_empty() {
                return template;
            }
        }
        match self.themes.get(name) {
            Some(template) => template,
            None => {
                warn!(
                    "unknown theme '{}', falling back to '{}' (available: {})",
                    name,
                    DEFAULT_THEME,
                    self.names().join(", ")
                );
                self.themes[DEFAULT_THEME]
            }
        }
    }

    /// Check whether a theme name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// List registered theme names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.themes.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
