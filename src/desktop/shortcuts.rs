//! Global keyboard shortcuts
//!
//! `Mod` is Ctrl or Cmd. These are checked before the input editor sees a
//! key, so `Ctrl+Tab` switches tabs instead of completing.

use crate::input::KeyInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `Mod+]` or `Ctrl+Tab`
    NextTab,
    /// `Mod+[` or `Ctrl+Shift+Tab`
    PreviousTab,
    /// `Mod+1` .. `Mod+9`, as a 0-based index
    JumpTo(usize),
    /// `Mod+T`
    NewTab,
    /// `Mod+Shift+W`
    CloseTab,
}

impl Shortcut {
    pub fn from_key(key: &KeyInput) -> Option<Shortcut> {
        let mods = key.modifiers;
        let primary = mods.primary();

        match key.key.as_str() {
            "Tab" if mods.ctrl && mods.shift => Some(Shortcut::PreviousTab),
            "Tab" if mods.ctrl => Some(Shortcut::NextTab),
            "]" if primary => Some(Shortcut::NextTab),
            "[" if primary => Some(Shortcut::PreviousTab),
            "t" if primary && !mods.shift => Some(Shortcut::NewTab),
            "w" | "W" if primary && mods.shift => Some(Shortcut::CloseTab),
            digit if primary => match digit.parse::<usize>() {
                Ok(n @ 1..=9) => Some(Shortcut::JumpTo(n - 1)),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycling() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("]").meta()),
            Some(Shortcut::NextTab)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("[").ctrl()),
            Some(Shortcut::PreviousTab)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("Tab").ctrl()),
            Some(Shortcut::NextTab)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("Tab").ctrl().shift()),
            Some(Shortcut::PreviousTab)
        );
    }

    #[test]
    fn test_plain_tab_is_not_a_shortcut() {
        assert_eq!(Shortcut::from_key(&KeyInput::new("Tab")), None);
        assert_eq!(Shortcut::from_key(&KeyInput::new("Tab").meta()), None);
    }

    #[test]
    fn test_jump() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("1").ctrl()),
            Some(Shortcut::JumpTo(0))
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("9").meta()),
            Some(Shortcut::JumpTo(8))
        );
        assert_eq!(Shortcut::from_key(&KeyInput::new("0").ctrl()), None);
        assert_eq!(Shortcut::from_key(&KeyInput::new("1")), None);
    }

    #[test]
    fn test_new_and_close() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("t").meta()),
            Some(Shortcut::NewTab)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::new("W").ctrl().shift()),
            Some(Shortcut::CloseTab)
        );
        // Ctrl+W alone is the editor's delete-word
        assert_eq!(Shortcut::from_key(&KeyInput::new("w").ctrl()), None);
        assert_eq!(Shortcut::from_key(&KeyInput::new("t")), None);
    }
}
