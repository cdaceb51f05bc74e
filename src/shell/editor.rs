//! Input line editing
//!
//! [`LineBuffer`] is the text being typed plus a caret. [`InputEditor`]
//! turns key presses into edits on a session's buffer: printable keys,
//! caret movement, readline-style Ctrl shortcuts, history recall with
//! Up/Down and command-name completion with Tab.

use super::registry::CommandRegistry;
use super::session::{Recall, SessionState};
use crate::input::KeyInput;

/// A line of text with a caret. The caret is a byte offset that always
/// sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    caret: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole line, caret at the end
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    /// Take the line out, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.caret = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.caret, c);
        self.caret += c.len_utf8();
    }

    /// Delete the char before the caret
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(start) => {
                self.text.replace_range(start..self.caret, "");
                self.caret = start;
                true
            }
            None => false,
        }
    }

    /// Delete the char under the caret
    pub fn delete(&mut self) -> bool {
        match self.next_boundary() {
            Some(end) => {
                self.text.replace_range(self.caret..end, "");
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        match self.prev_boundary() {
            Some(pos) => {
                self.caret = pos;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.next_boundary() {
            Some(pos) => {
                self.caret = pos;
                true
            }
            None => false,
        }
    }

    pub fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.text.len();
    }

    /// Ctrl+U: delete from line start to caret
    pub fn kill_to_start(&mut self) {
        self.text.replace_range(..self.caret, "");
        self.caret = 0;
    }

    /// Ctrl+K: delete from caret to line end
    pub fn kill_to_end(&mut self) {
        self.text.truncate(self.caret);
    }

    /// Ctrl+W: delete the word before the caret, plus trailing spaces
    pub fn kill_word(&mut self) {
        let before = &self.text[..self.caret];
        let trimmed = before.trim_end_matches(char::is_whitespace);
        let start = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        self.text.replace_range(start..self.caret, "");
        self.caret = start;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.caret]
            .chars()
            .next_back()
            .map(|c| self.caret - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.caret..]
            .chars()
            .next()
            .map(|c| self.caret + c.len_utf8())
    }
}

/// What a key press did to the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Not an editing key; let it through
    Ignored,
    /// Consumed; the line may have changed
    Edited,
    /// Enter on a non-blank line. Carries the trimmed text, already
    /// recorded in history.
    Submit(String),
}

/// Key handling for a session's input line
pub struct InputEditor<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> InputEditor<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn handle_key(&self, key: &KeyInput, session: &mut SessionState) -> EditorAction {
        let ctrl = key.modifiers.ctrl;
        let buffer = &mut session.input;

        match key.key.as_str() {
            "Enter" => {
                let line = buffer.take().trim().to_string();
                if line.is_empty() {
                    return EditorAction::Edited;
                }
                session.history.push(line.clone());
                EditorAction::Submit(line)
            }
            "ArrowUp" => {
                if let Some(entry) = session.history.older() {
                    buffer.set(entry);
                }
                EditorAction::Edited
            }
            "ArrowDown" => {
                match session.history.newer() {
                    Recall::Entry(entry) => buffer.set(entry),
                    Recall::Cleared => buffer.clear(),
                    Recall::Unchanged => {}
                }
                EditorAction::Edited
            }
            "Tab" if !ctrl => {
                if let Some(completed) = self.complete(buffer.text()) {
                    buffer.set(completed);
                }
                EditorAction::Edited
            }
            "Backspace" => {
                buffer.backspace();
                EditorAction::Edited
            }
            "Delete" => {
                buffer.delete();
                EditorAction::Edited
            }
            "ArrowLeft" => {
                buffer.move_left();
                EditorAction::Edited
            }
            "ArrowRight" => {
                buffer.move_right();
                EditorAction::Edited
            }
            "Home" => {
                buffer.home();
                EditorAction::Edited
            }
            "End" => {
                buffer.end();
                EditorAction::Edited
            }
            "a" if ctrl => {
                buffer.home();
                EditorAction::Edited
            }
            "e" if ctrl => {
                buffer.end();
                EditorAction::Edited
            }
            "u" if ctrl => {
                buffer.kill_to_start();
                EditorAction::Edited
            }
            "k" if ctrl => {
                buffer.kill_to_end();
                EditorAction::Edited
            }
            "w" if ctrl && !key.modifiers.shift => {
                buffer.kill_word();
                EditorAction::Edited
            }
            _ => match key.printable() {
                Some(c) => {
                    buffer.insert(c);
                    EditorAction::Edited
                }
                None => EditorAction::Ignored,
            },
        }
    }

    /// Complete a lone command-name prefix when exactly one name fits
    fn complete(&self, text: &str) -> Option<String> {
        if text.is_empty() || text.contains(char::is_whitespace) {
            return None;
        }
        let prefix = text.to_lowercase();
        let matches = self.registry.completions(&prefix);
        match matches.as_slice() {
            [only] => Some(format!("{} ", only)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(editor: &InputEditor, session: &mut SessionState, text: &str) {
        for key in KeyInput::typed(text) {
            editor.handle_key(&key, session);
        }
    }

    #[test]
    fn test_buffer_insert_and_caret() {
        let mut buf = LineBuffer::new();
        buf.insert('a');
        buf.insert('c');
        buf.move_left();
        buf.insert('b');
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.caret(), 2);
    }

    #[test]
    fn test_buffer_multibyte() {
        let mut buf = LineBuffer::new();
        buf.set("héllo");
        buf.home();
        buf.move_right();
        buf.move_right();
        assert_eq!(buf.caret(), 3);
        assert!(buf.backspace());
        assert_eq!(buf.text(), "hllo");
        assert_eq!(buf.caret(), 1);
    }

    #[test]
    fn test_buffer_edges() {
        let mut buf = LineBuffer::new();
        assert!(!buf.backspace());
        assert!(!buf.delete());
        assert!(!buf.move_left());
        assert!(!buf.move_right());
    }

    #[test]
    fn test_buffer_kills() {
        let mut buf = LineBuffer::new();
        buf.set("cat about.txt");
        buf.kill_word();
        assert_eq!(buf.text(), "cat ");

        buf.set("echo hello world");
        buf.home();
        for _ in 0..4 {
            buf.move_right();
        }
        buf.kill_to_end();
        assert_eq!(buf.text(), "echo");

        buf.set("echo hello");
        buf.move_left();
        buf.kill_to_start();
        assert_eq!(buf.text(), "o");
        assert_eq!(buf.caret(), 0);
    }

    #[test]
    fn test_kill_word_trailing_space() {
        let mut buf = LineBuffer::new();
        buf.set("ls projects/  ");
        buf.kill_word();
        assert_eq!(buf.text(), "ls ");
    }

    #[test]
    fn test_enter_submits_trimmed_and_records() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        typed(&editor, &mut session, "  ls  ");
        let action = editor.handle_key(&KeyInput::new("Enter"), &mut session);

        assert_eq!(action, EditorAction::Submit("ls".into()));
        assert!(session.input.is_empty());
        assert_eq!(session.history.get(0), Some("ls"));
    }

    #[test]
    fn test_enter_on_blank_line() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        typed(&editor, &mut session, "   ");
        let action = editor.handle_key(&KeyInput::new("Enter"), &mut session);

        assert_eq!(action, EditorAction::Edited);
        assert!(session.history.is_empty());
        assert!(session.input.is_empty());
    }

    #[test]
    fn test_history_recall() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();
        session.history.push("first");
        session.history.push("second");

        let up = KeyInput::new("ArrowUp");
        let down = KeyInput::new("ArrowDown");

        editor.handle_key(&up, &mut session);
        assert_eq!(session.input.text(), "second");
        assert_eq!(session.input.caret(), "second".len());
        editor.handle_key(&up, &mut session);
        assert_eq!(session.input.text(), "first");
        editor.handle_key(&up, &mut session);
        assert_eq!(session.input.text(), "first");

        editor.handle_key(&down, &mut session);
        assert_eq!(session.input.text(), "second");
        editor.handle_key(&down, &mut session);
        assert_eq!(session.input.text(), "");
    }

    #[test]
    fn test_tab_completes_unique_prefix() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        typed(&editor, &mut session, "neo");
        editor.handle_key(&KeyInput::new("Tab"), &mut session);
        assert_eq!(session.input.text(), "neofetch ");
    }

    #[test]
    fn test_tab_ambiguous_or_with_args_is_noop() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        // "c" matches cat, cd, clear, ...
        typed(&editor, &mut session, "c");
        editor.handle_key(&KeyInput::new("Tab"), &mut session);
        assert_eq!(session.input.text(), "c");

        session.input.set("cat ab");
        editor.handle_key(&KeyInput::new("Tab"), &mut session);
        assert_eq!(session.input.text(), "cat ab");
    }

    #[test]
    fn test_tab_completes_aliases() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        typed(&editor, &mut session, "di");
        editor.handle_key(&KeyInput::new("Tab"), &mut session);
        assert_eq!(session.input.text(), "dir ");
    }

    #[test]
    fn test_ctrl_keys_do_not_type() {
        let registry = CommandRegistry::with_builtins();
        let editor = InputEditor::new(&registry);
        let mut session = SessionState::default();

        typed(&editor, &mut session, "pwd");
        editor.handle_key(&KeyInput::new("a").ctrl(), &mut session);
        assert_eq!(session.input.text(), "pwd");
        assert_eq!(session.input.caret(), 0);

        let action = editor.handle_key(&KeyInput::new("c").ctrl(), &mut session);
        assert_eq!(action, EditorAction::Ignored);
    }
}
