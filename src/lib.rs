//! Shade: light/dark theme store with a persisted preference
//!
//! A [`store::ThemeProvider`] owns the dark-mode flag for one UI tree,
//! exposes the matching [`theme::ColorScheme`], and keeps the choice in a
//! [`storage::KeyValueStore`] under a single key.

pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod theme;
pub mod ui;

pub use error::{ColorError, StorageError, ThemeError};
pub use store::{ThemeHandle, ThemeProvider, ThemeSubscription, PREFERENCE_KEY};
pub use theme::{ColorScheme, ThemeMode, ThemeState, DARK, LIGHT};
