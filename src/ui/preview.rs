//! Palette preview widget

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use super::theme;
use crate::store::ThemeHandle;

/// Named top-level colors, in display order
const SWATCHES: [&str; 10] = [
    "bg", "surface", "text", "textMuted", "border", "primary", "success", "warning", "danger",
    "shadow",
];

/// Preview of the palette the handle currently resolves to.
///
/// Renders an error line instead when the handle has outlived its provider.
pub fn view<'a, Message: Clone + 'a>(theme_handle: &ThemeHandle, on_toggle: Message) -> Element<'a, Message> {
    let state = match theme_handle.state() {
        Ok(state) => state,
        Err(e) => return text(e.to_string()).into(),
    };
    let colors = state.colors;

    let header = row![
        column![
            text(if state.is_dark_mode { "Dark mode" } else { "Light mode" })
                .size(22)
                .color(theme::color(colors.text)),
            text(format!("Status bar: {}", colors.status_bar_style.as_str()))
                .size(13)
                .color(theme::color(colors.text_muted)),
        ]
        .spacing(4),
        Space::with_width(Length::Fill),
        button(text(format!("Switch to {}", state.mode().toggled().as_str())).size(15))
            .on_press(on_toggle)
            .padding(Padding::from([8.0, 16.0]))
            .style(move |_theme, status| theme::primary_button(colors, status)),
    ]
    .align_y(Alignment::Center);

    let swatches = row(SWATCHES.iter().map(|name| {
        let hex = colors.hex(name).unwrap_or(colors.shadow);
        let swatch: Element<'a, Message> = column![
            container(Space::new(Length::Fill, 32))
                .width(Length::Fill)
                .style(move |_theme| theme::swatch(hex, colors.border)),
            text(*name).size(11).color(theme::color(colors.text_muted)),
        ]
        .spacing(4)
        .width(Length::Fill)
        .into();
        swatch
    }))
    .spacing(8);

    let g = &colors.gradients;
    let gradients = row([
        ("background", g.background),
        ("surface", g.surface),
        ("primary", g.primary),
        ("success", g.success),
        ("warning", g.warning),
        ("danger", g.danger),
        ("muted", g.muted),
        ("empty", g.empty),
    ]
    .into_iter()
    .map(|(name, stops)| -> Element<'a, Message> {
        column![
            container(Space::new(Length::Fill, 24))
                .width(Length::Fill)
                .style(move |_theme| theme::gradient(stops, colors.border)),
            text(name).size(11).color(theme::color(colors.text_muted)),
        ]
        .spacing(4)
        .width(Length::Fill)
        .into()
    }))
    .spacing(8);

    let inputs = row![
        container(text("input").size(13).color(theme::color(colors.text)))
            .padding(10)
            .width(Length::Fill)
            .style(move |_theme| theme::swatch(colors.backgrounds.input, colors.border)),
        container(text("editInput").size(13).color(theme::color(colors.text)))
            .padding(10)
            .width(Length::Fill)
            .style(move |_theme| theme::swatch(colors.backgrounds.edit_input, colors.border)),
    ]
    .spacing(8);

    container(
        column![header, swatches, gradients, inputs].spacing(16),
    )
    .padding(16)
    .width(Length::Fill)
    .style(move |_theme| theme::surface(colors))
    .into()
}
