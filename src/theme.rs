//! Color themes
//!
//! The active theme is the one piece of state that survives a reload. It is
//! read from the preference store at startup and written back on every
//! successful change.

use crate::prefs::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Meadow,
    Rainy,
}

impl Theme {
    /// All themes, default first
    pub const ALL: [Theme; 2] = [Theme::Meadow, Theme::Rainy];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Meadow => "meadow",
            Theme::Rainy => "rainy",
        }
    }

    /// Root element class; the default theme needs none
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Theme::Meadow => None,
            Theme::Rainy => Some("theme-rainy"),
        }
    }

    /// Comma-separated list of theme names
    pub fn available() -> String {
        Self::ALL.iter().map(Theme::name).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that isn't a theme
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Owns the current theme and its persistence
pub struct ThemeManager {
    store: Box<dyn PreferenceStore>,
    key: String,
    current: Theme,
}

impl ThemeManager {
    /// Load the saved theme. Missing or unrecognized values fall back to the
    /// default without touching the store.
    pub fn load(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = store
            .get(&key)
            .and_then(|name| name.parse().ok())
            .unwrap_or_default();
        log::debug!("theme loaded: {}", current);
        Self {
            store,
            key,
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch themes and persist. A failed write keeps the new theme for
    /// this page load.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.store.set(&self.key, theme.name()) {
            log::warn!("failed to persist theme {}: {}", theme, e);
        }
    }

    /// Give the store back, e.g. to reload from it
    #[cfg(test)]
    pub fn into_store(self) -> Box<dyn PreferenceStore> {
        self.store
    }
}
