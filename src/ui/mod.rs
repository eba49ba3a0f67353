//! iced views for the theme preview window

pub mod preview;
pub mod theme;
