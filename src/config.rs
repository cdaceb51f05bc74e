//! Shell configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Delays are in milliseconds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown before the input line and echoed commands
    pub prompt: String,
    /// Answer to `whoami`, also used in window titles
    pub user: String,
    /// Browser tab title shown while the home tab is active (`~/<site_name>`)
    pub site_name: String,
    /// History entries kept per session
    pub max_history: usize,
    /// Entries shown by `history`
    pub history_display: usize,
    /// Delay between `exit` printing its farewell and the tab closing
    pub exit_delay_ms: f64,
    /// Delay before focusing the input after a tab switch
    pub tab_focus_delay_ms: f64,
    /// Delay before focusing the input after the window opens or restores
    pub restore_focus_delay_ms: f64,
    /// Delay before the `party` flourish starts
    pub flourish_delay_ms: f64,
    /// How long the flourish runs
    pub flourish_duration_ms: f64,
    /// Smallest width a manual resize may produce
    pub min_window_width: f64,
    /// Smallest height a manual resize may produce
    pub min_window_height: f64,
    /// Preference key under which the theme is persisted
    pub theme_key: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: ">".into(),
            user: "emily".into(),
            site_name: "emilynguyen".into(),
            max_history: 50,
            history_display: 20,
            exit_delay_ms: 500.0,
            tab_focus_delay_ms: 50.0,
            restore_focus_delay_ms: 100.0,
            flourish_delay_ms: 100.0,
            flourish_duration_ms: 2000.0,
            min_window_width: 320.0,
            min_window_height: 200.0,
            theme_key: "cozyterm-theme".into(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the state machines can't work with
    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            return Err(Error::Config("max_history must be at least 1".into()));
        }
        if self.min_window_width <= 0.0 || self.min_window_height <= 0.0 {
            return Err(Error::Config("minimum window size must be positive".into()));
        }
        let delays = [
            self.exit_delay_ms,
            self.tab_focus_delay_ms,
            self.restore_focus_delay_ms,
            self.flourish_delay_ms,
            self.flourish_duration_ms,
        ];
        if delays.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(Error::Config("delays must be finite and non-negative".into()));
        }
        if self.theme_key.is_empty() {
            return Err(Error::Config("theme_key must not be empty".into()));
        }
        Ok(())
    }
}
