//! Storage location configuration

use std::path::PathBuf;

/// Env var overriding the preferences directory
pub const CONFIG_DIR_ENV: &str = "SHADE_CONFIG_DIR";

/// File name of the preferences file inside the preferences directory
pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("shade");
        Self { dir }
    }
}

impl StoreConfig {
    /// Resolve from the environment, falling back to the user config dir
    pub fn load() -> Self {
        Self::from_env_value(std::env::var(CONFIG_DIR_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(dir) => Self { dir: PathBuf::from(dir) },
            None => Self::default(),
        }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }
}
