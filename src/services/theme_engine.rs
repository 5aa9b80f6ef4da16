//! Theme Engine: maps the selected theme to the CSS variables the browser
//! chrome is painted with.
//!
//! `System` yields no overrides: the toolbar stylesheet then follows the
//! platform's `prefers-color-scheme`.

use std::collections::BTreeMap;

use crate::types::settings::ThemeMode;

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn set_theme(&mut self, mode: ThemeMode);
    fn theme(&self) -> ThemeMode;
    fn css_variables(&self) -> BTreeMap<String, String>;
}

/// Dark chrome colors.
struct DarkPalette;
impl DarkPalette {
    const WINDOW: &'static str = "#1c1f24";
    const TEXT: &'static str = "#e8eaed";
    const BASE: &'static str = "#242830";
    const BORDER: &'static str = "#3a3f4b";
    const HIGHLIGHT: &'static str = "#4c8bf5";
    const MUTED_TEXT: &'static str = "#9aa0a6";
}

/// Light chrome colors.
struct LightPalette;
impl LightPalette {
    const WINDOW: &'static str = "#f5f7fa";
    const TEXT: &'static str = "#1f2933";
    const BASE: &'static str = "#ffffff";
    const BORDER: &'static str = "#d5dae1";
    const HIGHLIGHT: &'static str = "#1a73e8";
    const MUTED_TEXT: &'static str = "#5f6b7a";
}

pub struct ThemeEngine {
    current_theme: ThemeMode,
}

impl ThemeEngine {
    pub fn new(mode: ThemeMode) -> Self {
        Self { current_theme: mode }
    }

    fn build_variables(
        window: &str,
        text: &str,
        base: &str,
        border: &str,
        highlight: &str,
        muted_text: &str,
    ) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("--chrome-bg".into(), window.into());
        vars.insert("--chrome-text".into(), text.into());
        vars.insert("--input-bg".into(), base.into());
        vars.insert("--border-color".into(), border.into());
        vars.insert("--accent-color".into(), highlight.into());
        vars.insert("--muted-text".into(), muted_text.into());
        vars
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn set_theme(&mut self, mode: ThemeMode) {
        self.current_theme = mode;
    }

    fn theme(&self) -> ThemeMode {
        self.current_theme
    }

    fn css_variables(&self) -> BTreeMap<String, String> {
        match self.current_theme {
            ThemeMode::Dark => Self::build_variables(
                DarkPalette::WINDOW,
                DarkPalette::TEXT,
                DarkPalette::BASE,
                DarkPalette::BORDER,
                DarkPalette::HIGHLIGHT,
                DarkPalette::MUTED_TEXT,
            ),
            ThemeMode::Light => Self::build_variables(
                LightPalette::WINDOW,
                LightPalette::TEXT,
                LightPalette::BASE,
                LightPalette::BORDER,
                LightPalette::HIGHLIGHT,
                LightPalette::MUTED_TEXT,
            ),
            ThemeMode::System => BTreeMap::new(),
        }
    }
}
