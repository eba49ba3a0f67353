//! Preview application state and iced wiring
//!
//! The app is the UI root and owns the one `ThemeProvider` for its tree.

use std::sync::Arc;

use iced::keyboard::{self, Key};
use iced::widget::{column, container, text, Space};
use iced::{Element, Event, Length, Subscription, Task, Theme};

use shade::storage::KeyValueStore;
use shade::store::ThemeProvider;
use shade::ui::{preview, theme};

// ============================================================================
// Application State
// ============================================================================

pub struct Shade {
    provider: ThemeProvider,
    loaded: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    PreferenceLoaded,
    ToggleTheme,
    PreferenceSaved,
    IcedEvent(Event),
}

impl Shade {
    /// Build the app and start loading the stored preference.
    ///
    /// The window renders in light mode until the load resolves.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> (Self, Task<Message>) {
        let provider = ThemeProvider::new(storage);
        let load = provider.load();
        (
            Self {
                provider,
                loaded: false,
            },
            Task::perform(load, |_| Message::PreferenceLoaded),
        )
    }

    pub fn title(&self) -> String {
        String::from("Shade")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PreferenceLoaded => {
                self.loaded = true;
                tracing::debug!("Preference loaded, dark mode: {}", self.provider.is_dark_mode());
                Task::none()
            }

            Message::ToggleTheme => {
                Task::perform(self.provider.toggle(), |_| Message::PreferenceSaved)
            }

            Message::PreferenceSaved => Task::none(),

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event {
                    if is_toggle_key(&key) {
                        return self.update(Message::ToggleTheme);
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let colors = self.provider.colors();
        let hint = if self.loaded {
            "Press T to toggle"
        } else {
            "Loading preference..."
        };

        container(
            column![
                preview::view(&self.provider.handle(), Message::ToggleTheme),
                Space::with_height(12),
                text(hint).size(13).color(theme::color(colors.text_muted)),
            ]
            .spacing(0),
        )
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        theme::iced_theme(&self.provider.state())
    }
}

/// `T` toggles, with or without Shift or Caps Lock
fn is_toggle_key(key: &Key) -> bool {
    matches!(key.as_ref(), Key::Character(c) if c.eq_ignore_ascii_case("t"))
}
