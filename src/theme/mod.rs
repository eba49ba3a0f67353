//! Theme palettes and the derived theme state

mod palette;

pub use palette::{parse_hex, Backgrounds, ColorScheme, Gradients, StatusBarStyle, DARK, LIGHT};

use serde::Serialize;

/// The two states of the theme store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Palette for this mode
    pub fn colors(self) -> &'static ColorScheme {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

/// Snapshot handed to consumers. Always derived from the dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub is_dark_mode: bool,
    pub colors: &'static ColorScheme,
}

impl ThemeState {
    pub fn from_dark(is_dark_mode: bool) -> Self {
        Self {
            is_dark_mode,
            colors: ThemeMode::from_dark(is_dark_mode).colors(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.is_dark_mode)
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::from_dark(false)
    }
}
