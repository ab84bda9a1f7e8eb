//! Theme preference persistence

use super::storage::{KeyValueStorage, StorageError};

/// Fixed storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

/// Light/dark theme, persisted as the literal strings `"light"`/`"dark"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Read the stored preference; absent or unrecognized values fall back
    /// to the default dark theme
    pub fn load(storage: &impl KeyValueStorage) -> Result<Self, StorageError> {
        Ok(storage
            .get(THEME_KEY)?
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default())
    }

    pub fn save(self, storage: &impl KeyValueStorage) -> Result<(), StorageError> {
        storage.set(THEME_KEY, self.as_str())
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Self::Dark => egui::Visuals::dark(),
            Self::Light => egui::Visuals::light(),
        }
    }
}
