//! Per-tab shell state
//!
//! Each tab owns one [`SessionState`]: its working directory, its command
//! history and its input line. Nothing here is shared between tabs.

use super::editor::LineBuffer;
use crate::vfs::ROOT;
use std::collections::VecDeque;

/// Bounded command history, most recent first, with a recall cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    cap: usize,
    /// Index of the entry being recalled; `None` when not browsing
    cursor: Option<usize>,
}

/// Outcome of stepping the cursor toward newer entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall<'a> {
    /// Landed on this entry
    Entry(&'a str),
    /// Walked past the newest entry; the line should be emptied
    Cleared,
    /// Not browsing, nothing to do
    Unchanged,
}

impl History {
    /// Create an empty history holding at most `cap` entries (minimum 1)
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
            cursor: None,
        }
    }

    /// Record a submitted line. Drops the oldest entry past the cap and
    /// stops browsing.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.entries.truncate(self.cap);
        self.cursor = None;
    }

    /// Step toward older entries. `None` when already at the oldest.
    pub fn older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.entries.len() {
            self.cursor = Some(next);
            self.entries.get(next).map(String::as_str)
        } else {
            None
        }
    }

    /// Step toward newer entries
    pub fn newer(&mut self) -> Recall<'_> {
        match self.cursor {
            None => Recall::Unchanged,
            Some(0) => {
                self.cursor = None;
                Recall::Cleared
            }
            Some(c) => {
                self.cursor = Some(c - 1);
                self.entries
                    .get(c - 1)
                    .map_or(Recall::Cleared, |e| Recall::Entry(e))
            }
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// State of one shell session
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current working directory
    pub cwd: String,
    /// Submitted lines
    pub history: History,
    /// The line being edited
    pub input: LineBuffer,
}

impl SessionState {
    /// A session at the root with the given history cap
    pub fn new(max_history: usize) -> Self {
        Self::with_cwd(ROOT, max_history)
    }

    /// A session starting in `cwd`
    pub fn with_cwd(cwd: impl Into<String>, max_history: usize) -> Self {
        Self {
            cwd: cwd.into(),
            history: History::new(max_history),
            input: LineBuffer::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(50)
    }
}
