//! The two fixed color palettes

use iced::Color;
use serde::Serialize;

use crate::error::ColorError;

/// Platform status bar content style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBarStyle {
    #[serde(rename = "light-content")]
    LightContent,
    #[serde(rename = "dark-content")]
    DarkContent,
}

impl StatusBarStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusBarStyle::LightContent => "light-content",
            StatusBarStyle::DarkContent => "dark-content",
        }
    }
}

/// Start/end stops for each named gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradients {
    pub background: [&'static str; 2],
    pub surface: [&'static str; 2],
    pub primary: [&'static str; 2],
    pub success: [&'static str; 2],
    pub warning: [&'static str; 2],
    pub danger: [&'static str; 2],
    pub muted: [&'static str; 2],
    pub empty: [&'static str; 2],
}

/// Input field backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backgrounds {
    pub input: &'static str,
    pub edit_input: &'static str,
}

/// A complete palette. Colors are `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub bg: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub primary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
    pub shadow: &'static str,
    pub gradients: Gradients,
    pub backgrounds: Backgrounds,
    pub status_bar_style: StatusBarStyle,
}

pub static LIGHT: ColorScheme = ColorScheme {
    bg: "#e8f4f8",
    surface: "#ffffff",
    text: "#0a2540",
    text_muted: "#5e7a91",
    border: "#c7e0ea",
    primary: "#0891b2",
    success: "#14b8a6",
    warning: "#f59e0b",
    danger: "#ef4444",
    shadow: "#000000",
    gradients: Gradients {
        background: ["#e0f2fe", "#bae6fd"],
        surface: ["#ffffff", "#f0f9ff"],
        primary: ["#06b6d4", "#0891b2"],
        success: ["#14b8a6", "#0d9488"],
        warning: ["#fbbf24", "#f59e0b"],
        danger: ["#f87171", "#ef4444"],
        muted: ["#94a3b8", "#64748b"],
        empty: ["#e0f2fe", "#bae6fd"],
    },
    backgrounds: Backgrounds {
        input: "#f0f9ff",
        edit_input: "#ffffff",
    },
    status_bar_style: StatusBarStyle::DarkContent,
};

pub static DARK: ColorScheme = ColorScheme {
    bg: "#0a1929",
    surface: "#132f4c",
    text: "#e3f2fd",
    text_muted: "#81a4cd",
    border: "#1e3a5f",
    primary: "#22d3ee",
    success: "#2dd4bf",
    warning: "#fbbf24",
    danger: "#f87171",
    shadow: "#000000",
    gradients: Gradients {
        background: ["#0a1929", "#132f4c"],
        surface: ["#132f4c", "#1e3a5f"],
        primary: ["#06b6d4", "#0891b2"],
        success: ["#14b8a6", "#0d9488"],
        warning: ["#fbbf24", "#f59e0b"],
        danger: ["#f87171", "#ef4444"],
        muted: ["#1e3a5f", "#2d4f72"],
        empty: ["#164e63", "#155e75"],
    },
    backgrounds: Backgrounds {
        input: "#1a3149",
        edit_input: "#0f2438",
    },
    status_bar_style: StatusBarStyle::LightContent,
};

impl ColorScheme {
    /// Dotted key paths of every field, e.g. `gradients.muted`.
    ///
    /// Consumers switching palettes rely on both schemes yielding the same list.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Ok(value) = serde_json::to_value(self) {
            collect_keys(&value, "", &mut keys);
        }
        keys.sort();
        keys
    }

    /// Every hex color in the scheme, gradient stops included
    pub fn hex_values(&self) -> Vec<&'static str> {
        let g = &self.gradients;
        let mut values = vec![
            self.bg,
            self.surface,
            self.text,
            self.text_muted,
            self.border,
            self.primary,
            self.success,
            self.warning,
            self.danger,
            self.shadow,
            self.backgrounds.input,
            self.backgrounds.edit_input,
        ];
        for pair in [
            g.background,
            g.surface,
            g.primary,
            g.success,
            g.warning,
            g.danger,
            g.muted,
            g.empty,
        ] {
            values.extend(pair);
        }
        values
    }

    /// Hex value of a top-level color by its serialized name
    pub fn hex(&self, name: &str) -> Option<&'static str> {
        Some(match name {
            "bg" => self.bg,
            "surface" => self.surface,
            "text" => self.text,
            "textMuted" => self.text_muted,
            "border" => self.border,
            "primary" => self.primary,
            "success" => self.success,
            "warning" => self.warning,
            "danger" => self.danger,
            "shadow" => self.shadow,
            _ => return None,
        })
    }
}

fn collect_keys(value: &serde_json::Value, prefix: &str, out: &mut Vec<String>) {
    if let serde_json::Value::Object(map) = value {
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            if child.is_object() {
                collect_keys(child, &path, out);
            } else {
                out.push(path);
            }
        }
    }
}

/// Parse a `#rrggbb` string into an opaque color
pub fn parse_hex(hex: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidHex(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
}
