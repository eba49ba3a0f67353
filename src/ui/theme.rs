//! Theme configuration for iced

use iced::theme::Palette;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

use crate::theme::{parse_hex, ColorScheme, ThemeState};

/// Resolve a palette color. Both palettes are checked by tests, so the
/// fallback only shows up if a constant is edited badly.
pub fn color(hex: &str) -> Color {
    parse_hex(hex).unwrap_or(Color::from_rgb(1.0, 0.0, 1.0))
}

/// Build the iced theme for the current state
pub fn iced_theme(state: &ThemeState) -> Theme {
    let colors = state.colors;
    let name = if state.is_dark_mode { "Shade Dark" } else { "Shade Light" };
    Theme::custom(
        name.to_string(),
        Palette {
            background: color(colors.bg),
            text: color(colors.text),
            primary: color(colors.primary),
            success: color(colors.success),
            danger: color(colors.danger),
        },
    )
}

pub fn surface(colors: &ColorScheme) -> container::Style {
    container::Style {
        background: Some(Background::Color(color(colors.surface))),
        text_color: Some(color(colors.text)),
        border: Border {
            color: color(colors.border),
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

pub fn swatch(hex: &str, border: &str) -> container::Style {
    container::Style {
        background: Some(Background::Color(color(hex))),
        border: Border {
            color: color(border),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Two-stop gradient rendered as a linear background
pub fn gradient(stops: [&str; 2], border: &str) -> container::Style {
    let linear = iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
        .add_stop(0.0, color(stops[0]))
        .add_stop(1.0, color(stops[1]));
    container::Style {
        background: Some(Background::Gradient(linear.into())),
        border: Border {
            color: color(border),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn primary_button(colors: &ColorScheme, status: button::Status) -> button::Style {
    let base = match status {
        button::Status::Hovered | button::Status::Pressed => colors.gradients.primary[0],
        _ => colors.primary,
    };
    button::Style {
        background: Some(Background::Color(color(base))),
        text_color: color(colors.surface),
        border: Border::default().rounded(8),
        ..button::Style::default()
    }
}
