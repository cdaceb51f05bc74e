//! Keyboard input
//!
//! Key events as the core sees them: the DOM `key` value plus modifier
//! state. Adapters translate their native events into this.

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS. Either counts.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// The key value (e.g. "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    /// The single character this key types, if it types one
    pub fn printable(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.meta {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Keys for each character of `text`, for replaying typed input
    pub fn typed(text: &str) -> Vec<KeyInput> {
        text.chars().map(|c| KeyInput::new(c.to_string())).collect()
    }
}
