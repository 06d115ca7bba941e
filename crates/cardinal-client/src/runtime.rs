//! Theme application runtime — the CSS custom property surface.
//!
//! Holds the resolved variable assignments for the active document. The
//! shell reads the snapshot and writes each entry onto the root element.

use std::collections::BTreeMap;

use cardinal_common::models::Theme;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeRuntime {
    vars: BTreeMap<String, String>,
}

impl ThemeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the theme's projection. Safe to call repeatedly with different
    /// themes: last write wins per variable name.
    pub fn apply(&mut self, theme: &Theme) {
        for (name, value) in theme.css_variables() {
            self.vars.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Current assignment set, for the rendering layer.
    pub fn snapshot(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Restore a previously captured assignment set (failed-save rollback).
    pub(crate) fn restore(&mut self, vars: BTreeMap<String, String>) {
        self.vars = vars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applying_twice_equals_applying_once() {
        let theme = Theme::built_in_default();

        let mut once = ThemeRuntime::new();
        once.apply(&theme);

        let mut twice = ThemeRuntime::new();
        twice.apply(&theme);
        twice.apply(&theme);

        assert_eq!(once, twice);
    }

    #[test]
    fn last_write_wins_per_variable() {
        let light = Theme::built_in_default();
        let mut dark = Theme::built_in_default();
        dark.colors.primary = "#0f172a".into();

        let mut runtime = ThemeRuntime::new();
        runtime.apply(&light);
        runtime.apply(&dark);

        assert_eq!(runtime.get("--primary"), Some("#0f172a"));
        // Variables the second theme also defines were overwritten in place
        assert_eq!(runtime.get("--background"), Some("#ffffff"));
    }
}
