//! Error types

use thiserror::Error;

/// Errors surfaced by the theme store to its consumers
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A handle was used after the provider that issued it was dropped
    #[error("theme state accessed outside of a ThemeProvider scope")]
    OutsideProvider,
}

/// Errors from a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from palette color parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color {0:?}, expected #rrggbb")]
    InvalidHex(String),
}
