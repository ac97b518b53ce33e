//! Theme Engine: mirrors the reading theme onto the document root and
//! provides palette CSS variables.

use std::collections::HashMap;

use crate::services::local_storage::{LocalStorage, PREFERENCES_KEY};
use crate::types::preferences::{PartialPreferences, Theme};

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    /// Applies `theme` to the document root. Returns `true` when anything changed.
    fn apply(&mut self, theme: Theme) -> bool;
    fn get_theme(&self) -> Option<Theme>;
    fn root_attributes(&self) -> HashMap<String, String>;
    fn is_dark(&self) -> bool;
    fn get_css_variables(&self) -> HashMap<String, String>;
}

/// Colours of one reading palette.
struct Palette {
    background: &'static str,
    surface: &'static str,
    text_primary: &'static str,
    text_secondary: &'static str,
    text_muted: &'static str,
    border: &'static str,
    primary: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#fdfbf7",
    surface: "#f5f0e8",
    text_primary: "#2d2a26",
    text_secondary: "#5c5650",
    text_muted: "#8a847c",
    border: "#e5ddd0",
    primary: "#b45309",
};

const DARK: Palette = Palette {
    background: "#1a1816",
    surface: "#242120",
    text_primary: "#e8e4dc",
    text_secondary: "#b5aea3",
    text_muted: "#857e74",
    border: "#3a3633",
    primary: "#f59e0b",
};

const SEPIA: Palette = Palette {
    background: "#f4ecd8",
    surface: "#ebe0c6",
    text_primary: "#5b4636",
    text_secondary: "#74604d",
    text_muted: "#94806b",
    border: "#d9c9a7",
    primary: "#9a5b13",
};

const HIGH_CONTRAST: Palette = Palette {
    background: "#000000",
    surface: "#111111",
    text_primary: "#ffffff",
    text_secondary: "#f0f0f0",
    text_muted: "#d0d0d0",
    border: "#ffffff",
    primary: "#ffd500",
};

fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
        Theme::Sepia => &SEPIA,
        Theme::HighContrast => &HIGH_CONTRAST,
    }
}

/// Reads only the theme out of the stored preferences record.
///
/// Runs before the preferences store initializes so the first paint already
/// uses the stored theme. Any failure yields `None`.
pub fn peek_stored_theme(storage: &dyn LocalStorage) -> Option<Theme> {
    let raw = storage.get_item(PREFERENCES_KEY).ok()??;
    PartialPreferences::from_json(&raw)?.theme
}

/// Document-root theme state: the `data-theme` attribute and the `dark` class.
#[derive(Debug, Default)]
pub struct ThemeEngine {
    current_theme: Option<Theme>,
}

impl ThemeEngine {
    /// Creates an engine with no theme applied to the root yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine primed from storage, as the page head script does.
    pub fn from_storage(storage: &dyn LocalStorage) -> Self {
        Self {
            current_theme: peek_stored_theme(storage),
        }
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn apply(&mut self, theme: Theme) -> bool {
        if self.current_theme == Some(theme) {
            return false;
        }
        self.current_theme = Some(theme);
        true
    }

    fn get_theme(&self) -> Option<Theme> {
        self.current_theme
    }

    fn root_attributes(&self) -> HashMap<String, String> {
        let mut attrs = HashMap::new();
        if let Some(theme) = self.current_theme {
            attrs.insert("data-theme".to_string(), theme.as_str().to_string());
        }
        if self.is_dark() {
            attrs.insert("class".to_string(), "dark".to_string());
        }
        attrs
    }

    fn is_dark(&self) -> bool {
        self.current_theme.map(|t| t.is_dark()).unwrap_or(false)
    }

    fn get_css_variables(&self) -> HashMap<String, String> {
        let p = palette(self.current_theme.unwrap_or(Theme::Light));
        let mut vars = HashMap::new();
        vars.insert("--background".into(), p.background.into());
        vars.insert("--surface".into(), p.surface.into());
        vars.insert("--text-primary".into(), p.text_primary.into());
        vars.insert("--text-secondary".into(), p.text_secondary.into());
        vars.insert("--text-muted".into(), p.text_muted.into());
        vars.insert("--border".into(), p.border.into());
        vars.insert("--primary".into(), p.primary.into());
        vars
    }
}
