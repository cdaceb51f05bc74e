//! Tab management
//!
//! The tab multiplexer: an ordered set of sessions, exactly one of which is
//! active whenever any exist. Sessions live in a slab; the order vector
//! holds slab keys in tab-bar order.

use crate::shell::SessionState;
use slab::Slab;
use std::fmt;

/// Tab identifier, also the URL fragment that selects it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub const HOME: &'static str = "home";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn home() -> Self {
        Self::new(Self::HOME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == Self::HOME
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Content pages that open as their own tab at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Projects,
    Games,
    Contact,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Projects, Page::Games, Page::Contact];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Projects => "projects",
            Page::Games => "games",
            Page::Contact => "contact",
        }
    }
}

/// What a tab was opened as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Home,
    Page(Page),
    /// A fresh `term-N` shell
    Terminal,
}

impl SessionKind {
    /// Working directory a new session of this kind starts in
    pub fn start_dir(&self) -> &'static str {
        match self {
            SessionKind::Page(Page::Projects) => "~/projects",
            SessionKind::Page(Page::Games) => "~/games",
            SessionKind::Home | SessionKind::Page(Page::Contact) | SessionKind::Terminal => "~",
        }
    }

    /// Command shown as the opening transcript of a new session
    pub fn banner_command(&self) -> &'static str {
        match self {
            SessionKind::Home => "cat about.txt",
            SessionKind::Page(Page::Projects) | SessionKind::Page(Page::Games) => "ls",
            SessionKind::Page(Page::Contact) => "cat contact.txt",
            SessionKind::Terminal => "echo new terminal session",
        }
    }
}

/// A tab and its shell state
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    kind: SessionKind,
    pub state: SessionState,
}

impl Session {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Tab-bar label, e.g. `~/term-2`
    pub fn label(&self) -> String {
        format!("~/{}", self.id)
    }
}

/// Result of [`TabManager::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub id: SessionId,
    /// False when an existing tab (home, a page) was re-activated
    pub created: bool,
}

/// Result of [`TabManager::close`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    NotFound,
    /// Closed; `activated` names the tab that took over if the closed one
    /// was active
    Closed { activated: Option<SessionId> },
    /// That was the last tab
    LastClosed,
}

pub struct TabManager {
    sessions: Slab<Session>,
    order: Vec<usize>,
    active: Option<usize>,
    /// Last `term-N` number handed out; never reused
    terminal_counter: u32,
    max_history: usize,
}

impl TabManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Slab::new(),
            order: Vec::new(),
            active: None,
            terminal_counter: 0,
            max_history,
        }
    }

    /// Open a tab of `kind` and make it active. Home and pages are
    /// singletons: opening one that exists just activates it.
    pub fn open(&mut self, kind: SessionKind) -> Opened {
        let id = match kind {
            SessionKind::Home => SessionId::home(),
            SessionKind::Page(page) => SessionId::new(page.name()),
            SessionKind::Terminal => self.next_terminal_id(),
        };

        if let Some(key) = self.key_of(&id) {
            self.active = Some(key);
            return Opened { id, created: false };
        }

        let state = SessionState::with_cwd(kind.start_dir(), self.max_history);
        let key = self.sessions.insert(Session {
            id: id.clone(),
            kind,
            state,
        });
        self.order.push(key);
        self.active = Some(key);
        log::debug!("opened tab {}", id);

        Opened { id, created: true }
    }

    fn next_terminal_id(&mut self) -> SessionId {
        loop {
            self.terminal_counter += 1;
            let id = SessionId::new(format!("term-{}", self.terminal_counter));
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Make `id` the active tab. False if there is no such tab.
    pub fn activate(&mut self, id: &SessionId) -> bool {
        match self.key_of(id) {
            Some(key) => {
                self.active = Some(key);
                true
            }
            None => false,
        }
    }

    /// Close `id`. If it was active, the tab that slides into its position
    /// (or the new last tab) becomes active.
    pub fn close(&mut self, id: &SessionId) -> CloseOutcome {
        let Some(pos) = self.position(id) else {
            return CloseOutcome::NotFound;
        };

        let key = self.order.remove(pos);
        self.sessions.remove(key);
        log::debug!("closed tab {}", id);

        if self.order.is_empty() {
            self.active = None;
            return CloseOutcome::LastClosed;
        }

        if self.active != Some(key) {
            return CloseOutcome::Closed { activated: None };
        }

        let next = self.order[pos.min(self.order.len() - 1)];
        self.active = Some(next);
        CloseOutcome::Closed {
            activated: Some(self.sessions[next].id.clone()),
        }
    }

    /// Activate the next tab, wrapping around
    pub fn next(&mut self) -> Option<SessionId> {
        self.step(1)
    }

    /// Activate the previous tab, wrapping around
    pub fn previous(&mut self) -> Option<SessionId> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<SessionId> {
        let len = self.order.len() as isize;
        let current = self.active_position()? as isize;
        let pos = (current + delta).rem_euclid(len) as usize;
        self.activate_position(pos)
    }

    /// Activate the tab at `index` (0-based). Out of range does nothing.
    pub fn jump_to(&mut self, index: usize) -> Option<SessionId> {
        if index < self.order.len() {
            self.activate_position(index)
        } else {
            None
        }
    }

    fn activate_position(&mut self, pos: usize) -> Option<SessionId> {
        let key = *self.order.get(pos)?;
        self.active = Some(key);
        Some(self.sessions[key].id.clone())
    }

    pub fn active(&self) -> Option<&Session> {
        self.active.and_then(|key| self.sessions.get(key))
    }

    pub fn active_mut(&mut self) -> Option<&mut Session> {
        self.active.and_then(|key| self.sessions.get_mut(key))
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active().map(Session::id)
    }

    pub fn is_active(&self, id: &SessionId) -> bool {
        self.active_id() == Some(id)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.key_of(id).map(|key| &self.sessions[key])
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.key_of(id).map(|key| &mut self.sessions[key])
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.key_of(id).is_some()
    }

    /// Tab ids in tab-bar order
    pub fn ids(&self) -> Vec<SessionId> {
        self.iter().map(|s| s.id.clone()).collect()
    }

    /// Sessions in tab-bar order
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.order.iter().map(|&key| &self.sessions[key])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn position(&self, id: &SessionId) -> Option<usize> {
        self.order
            .iter()
            .position(|&key| self.sessions[key].id == *id)
    }

    fn active_position(&self) -> Option<usize> {
        let active = self.active?;
        self.order.iter().position(|&key| key == active)
    }

    fn key_of(&self, id: &SessionId) -> Option<usize> {
        self.position(id).map(|pos| self.order[pos])
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(50)
    }
}
