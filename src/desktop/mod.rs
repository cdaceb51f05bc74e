//! Desktop - the terminal window and its tabs
//!
//! [`Desktop`] owns every piece of state behind the page: the tab
//! multiplexer, the window state machine, the theme, deferred tasks and
//! the shared interpreter. It is driven by [`UiEvent`]s and key presses and
//! answers with [`RenderOp`]s; it never touches the DOM itself, so the same
//! core runs under the browser adapter, the CLI and the tests.
//!
//! Time is passed in by the caller (milliseconds, monotonic). Anything
//! delayed goes through the scheduler and comes back out of [`Desktop::tick`].

pub mod geometry;
pub mod shortcuts;
pub mod tabs;
pub mod timer;
pub mod window;

pub use geometry::{Point, Rect, Size};
pub use shortcuts::Shortcut;
pub use tabs::{CloseOutcome, Page, Session, SessionId, SessionKind, TabManager};
pub use timer::{ScheduledTask, Scheduler, TaskId};
pub use window::{Layout, ResizeEdges, WindowController, WindowMode};

use crate::config::ShellConfig;
use crate::input::KeyInput;
use crate::prefs::PreferenceStore;
use crate::shell::{
    CommandOutput, Effect, EditorAction, InputEditor, Interpreter, LinkTarget, SessionState,
};
use crate::theme::{Theme, ThemeManager};
use std::collections::HashMap;

/// Banner drawn above the home tab's transcript
pub const HOME_ART: &str = "   ╭─────────────────────────────────────────────────────╮
   │  software engineer  ·  game dev  ·  educator       │
   ╰─────────────────────────────────────────────────────╯";

/// Input from the page, other than key presses
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    TabClicked(SessionId),
    TabCloseClicked(SessionId),
    NewTabClicked,
    CloseButton,
    MinimizeButton,
    MaximizeButton,
    RestoreButton,
    TitleBarDoubleClick,
    DesktopIconOpened,
    /// The URL fragment changed (with or without the leading `#`)
    FragmentChanged(String),
    /// Mouse down on the title bar; `frame` is the window's on-screen rect
    DragStart { pointer: Point, frame: Rect },
    ResizeStart {
        edges: ResizeEdges,
        pointer: Point,
        frame: Rect,
    },
    PointerMove { pointer: Point, viewport: Size },
    PointerUp,
}

/// Instructions for the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Add a tab button and an empty transcript, after the existing tabs
    TabOpened { id: SessionId, label: String },
    TabClosed { id: SessionId },
    /// Mark `id` active and retitle the window and document
    TabActivated {
        id: SessionId,
        title: String,
        document_title: String,
    },
    /// Decorative art at the top of a transcript
    Banner { id: SessionId, art: &'static str },
    /// Append a submitted line to a transcript
    CommandEcho {
        id: SessionId,
        prompt: String,
        line: String,
    },
    /// Append command output
    Output { id: SessionId, markup: String },
    /// Remove everything but the input line
    ClearTranscript { id: SessionId },
    /// Redraw the input line
    Input {
        id: SessionId,
        text: String,
        caret: usize,
    },
    Window(WindowMode),
    Layout(Layout),
    DesktopVisible(bool),
    Theme(Theme),
    OpenUrl { url: String, target: LinkTarget },
    /// Give keyboard focus to a tab's input line
    Focus { id: SessionId },
    Flourish(bool),
}

fn input_op(id: &SessionId, state: &SessionState) -> RenderOp {
    RenderOp::Input {
        id: id.clone(),
        text: state.input.text().to_string(),
        caret: state.input.caret(),
    }
}

pub struct Desktop {
    config: ShellConfig,
    interpreter: Interpreter,
    tabs: TabManager,
    window: WindowController,
    themes: ThemeManager,
    scheduler: Scheduler,
    /// Close tasks scheduled by `exit`, by session. Cancelled when the
    /// session goes away first so a reused id (`home`) isn't hit later.
    pending_exits: HashMap<SessionId, TaskId>,
}

impl Desktop {
    pub fn new(config: ShellConfig, store: Box<dyn PreferenceStore>) -> Self {
        let themes = ThemeManager::load(store, config.theme_key.clone());
        Self {
            interpreter: Interpreter::from_config(&config),
            tabs: TabManager::new(config.max_history),
            window: WindowController::new(Size::new(
                config.min_window_width,
                config.min_window_height,
            )),
            themes,
            scheduler: Scheduler::new(),
            pending_exits: HashMap::new(),
            config,
        }
    }

    /// Open the window with the home tab and the content pages, home
    /// active
    pub fn boot(&mut self, now: f64) -> Vec<RenderOp> {
        self.boot_at("", now)
    }

    /// Boot from a page URL: a fragment naming an open tab (`#games`)
    /// starts there instead of home
    pub fn boot_at(&mut self, fragment: &str, now: f64) -> Vec<RenderOp> {
        let mut ops = vec![RenderOp::Theme(self.themes.current())];

        self.spawn(SessionKind::Home, &mut ops);
        for page in Page::ALL {
            self.spawn(SessionKind::Page(page), &mut ops);
        }
        let start = SessionId::new(fragment.trim_start_matches('#'));
        if !self.tabs.activate(&start) {
            if !fragment.is_empty() {
                log::debug!("fragment '{}' names no tab, starting at home", start);
            }
            self.tabs.activate(&SessionId::home());
        }
        self.show_active(self.config.restore_focus_delay_ms, now, &mut ops);

        log::info!("desktop booted with {} tabs", self.tabs.len());
        ops
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn window(&self) -> &WindowController {
        &self.window
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn theme(&self) -> Theme {
        self.themes.current()
    }

    /// Window title for a tab
    pub fn title(&self, id: &SessionId) -> String {
        format!("{} — {}", self.config.user, id)
    }

    /// Browser document title for a tab
    pub fn document_title(&self, id: &SessionId) -> String {
        if id.is_home() {
            format!("~/{}", self.config.site_name)
        } else {
            format!("~/{}", id)
        }
    }

    /// Milliseconds until the next deferred task is due
    pub fn next_deadline(&self, now: f64) -> Option<f64> {
        self.scheduler.time_until_next(now)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_count()
    }

    // ========== Input ==========

    /// Handle a key press. `None` means the key wasn't used and the host
    /// should let it through.
    pub fn handle_key(&mut self, key: &KeyInput, now: f64) -> Option<Vec<RenderOp>> {
        if !self.window.is_open() {
            return None;
        }
        let mut ops = Vec::new();

        if key.key == "Escape" {
            if !self.window.escape() {
                return None;
            }
            self.window_changed(self.config.restore_focus_delay_ms, now, &mut ops);
            return Some(ops);
        }

        if let Some(shortcut) = Shortcut::from_key(key) {
            self.run_shortcut(shortcut, now, &mut ops);
            return Some(ops);
        }

        if self.window.mode() == WindowMode::Minimized {
            return None;
        }

        let id = self.tabs.active_id()?.clone();
        let editor = InputEditor::new(self.interpreter.registry());
        let session = self.tabs.get_mut(&id)?;
        match editor.handle_key(key, &mut session.state) {
            EditorAction::Ignored => return None,
            EditorAction::Edited => ops.push(input_op(&id, &session.state)),
            EditorAction::Submit(line) => {
                self.run_line(&id, &line, now, &mut ops);
                if let Some(session) = self.tabs.get(&id) {
                    ops.push(input_op(&id, &session.state));
                }
            }
        }
        Some(ops)
    }

    /// Handle a page event
    pub fn handle(&mut self, event: UiEvent, now: f64) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        let tab_delay = self.config.tab_focus_delay_ms;
        let restore_delay = self.config.restore_focus_delay_ms;

        match event {
            UiEvent::TabClicked(id) => {
                if self.tabs.activate(&id) {
                    self.show_active(tab_delay, now, &mut ops);
                }
            }
            UiEvent::TabCloseClicked(id) => self.close_session(&id, now, &mut ops),
            UiEvent::NewTabClicked => self.create_session(SessionKind::Terminal, now, &mut ops),
            UiEvent::CloseButton => self.close_window(&mut ops),
            UiEvent::MinimizeButton => {
                if self.window.minimize() {
                    ops.push(RenderOp::Window(self.window.mode()));
                }
            }
            UiEvent::MaximizeButton | UiEvent::TitleBarDoubleClick => {
                if self.window.toggle_maximize() {
                    ops.push(RenderOp::Window(self.window.mode()));
                }
            }
            UiEvent::RestoreButton => {
                if self.window.restore() {
                    self.window_changed(restore_delay, now, &mut ops);
                }
            }
            UiEvent::DesktopIconOpened => {
                self.open_window(&mut ops);
                if self.tabs.is_empty() {
                    self.spawn(SessionKind::Home, &mut ops);
                }
                self.show_active(restore_delay, now, &mut ops);
            }
            UiEvent::FragmentChanged(fragment) => {
                let id = SessionId::new(fragment.trim_start_matches('#'));
                if self.tabs.is_active(&id) {
                    return ops;
                }
                if self.tabs.activate(&id) {
                    self.show_active(tab_delay, now, &mut ops);
                } else {
                    log::debug!("fragment '{}' names no tab", id);
                }
            }
            UiEvent::DragStart { pointer, frame } => {
                if self.window.begin_drag(pointer, frame) {
                    ops.push(RenderOp::Layout(self.window.layout()));
                }
            }
            UiEvent::ResizeStart {
                edges,
                pointer,
                frame,
            } => {
                if self.window.begin_resize(edges, pointer, frame) {
                    ops.push(RenderOp::Layout(self.window.layout()));
                }
            }
            UiEvent::PointerMove { pointer, viewport } => {
                if let Some(rect) = self.window.pointer_move(pointer, viewport) {
                    ops.push(RenderOp::Layout(Layout::Positioned(rect)));
                }
            }
            UiEvent::PointerUp => {
                self.window.end_interaction();
            }
        }
        ops
    }

    /// Run every deferred task due at `now`
    pub fn tick(&mut self, now: f64) -> Vec<RenderOp> {
        let mut ops = Vec::new();
        for task in self.scheduler.tick(now) {
            match task {
                ScheduledTask::CloseSession(id) => {
                    self.pending_exits.remove(&id);
                    if self.tabs.contains(&id) {
                        self.close_session(&id, now, &mut ops);
                    } else {
                        log::debug!("deferred close of {}: already gone", id);
                    }
                }
                ScheduledTask::FocusInput(id) => {
                    if self.window.is_open() && self.tabs.is_active(&id) {
                        ops.push(RenderOp::Focus { id });
                    } else {
                        log::debug!("deferred focus of {}: no longer visible", id);
                    }
                }
                ScheduledTask::StartFlourish => ops.push(RenderOp::Flourish(true)),
                ScheduledTask::EndFlourish => ops.push(RenderOp::Flourish(false)),
            }
        }
        ops
    }

    // ========== Internals ==========

    fn run_shortcut(&mut self, shortcut: Shortcut, now: f64, ops: &mut Vec<RenderOp>) {
        let delay = self.config.tab_focus_delay_ms;
        match shortcut {
            Shortcut::NextTab => {
                if self.tabs.next().is_some() {
                    self.show_active(delay, now, ops);
                }
            }
            Shortcut::PreviousTab => {
                if self.tabs.previous().is_some() {
                    self.show_active(delay, now, ops);
                }
            }
            Shortcut::JumpTo(index) => {
                if self.tabs.jump_to(index).is_some() {
                    self.show_active(delay, now, ops);
                }
            }
            Shortcut::NewTab => self.create_session(SessionKind::Terminal, now, ops),
            Shortcut::CloseTab => {
                if let Some(id) = self.tabs.active_id().cloned() {
                    self.close_session(&id, now, ops);
                }
            }
        }
    }

    /// Open (or re-activate) a session and show it
    fn create_session(&mut self, kind: SessionKind, now: f64, ops: &mut Vec<RenderOp>) {
        self.spawn(kind, ops);
        self.show_active(self.config.tab_focus_delay_ms, now, ops);
    }

    /// Open a session without announcing activation. New sessions get their
    /// tab, banner and opening transcript.
    fn spawn(&mut self, kind: SessionKind, ops: &mut Vec<RenderOp>) -> SessionId {
        self.open_window(ops);

        let opened = self.tabs.open(kind);
        if opened.created {
            let label = self
                .tabs
                .get(&opened.id)
                .map(Session::label)
                .unwrap_or_default();
            ops.push(RenderOp::TabOpened {
                id: opened.id.clone(),
                label,
            });
            if kind == SessionKind::Home {
                ops.push(RenderOp::Banner {
                    id: opened.id.clone(),
                    art: HOME_ART,
                });
            }
            // Banner commands have no effects; time is irrelevant
            self.run_line(&opened.id, kind.banner_command(), 0.0, ops);
        }
        opened.id
    }

    fn show_active(&mut self, focus_delay: f64, now: f64, ops: &mut Vec<RenderOp>) {
        let Some(id) = self.tabs.active_id().cloned() else {
            return;
        };
        ops.push(RenderOp::TabActivated {
            title: self.title(&id),
            document_title: self.document_title(&id),
            id: id.clone(),
        });
        self.scheduler
            .schedule(focus_delay, now, ScheduledTask::FocusInput(id));
    }

    fn close_session(&mut self, id: &SessionId, now: f64, ops: &mut Vec<RenderOp>) {
        let outcome = self.tabs.close(id);
        if outcome != CloseOutcome::NotFound
            && let Some(task) = self.pending_exits.remove(id)
        {
            self.scheduler.cancel(task);
            log::debug!("dropped pending exit of {}", id);
        }
        match outcome {
            CloseOutcome::NotFound => log::debug!("close {}: no such tab", id),
            CloseOutcome::Closed { activated } => {
                ops.push(RenderOp::TabClosed { id: id.clone() });
                if activated.is_some() {
                    self.show_active(self.config.tab_focus_delay_ms, now, ops);
                }
            }
            CloseOutcome::LastClosed => {
                ops.push(RenderOp::TabClosed { id: id.clone() });
                self.close_window(ops);
            }
        }
    }

    fn open_window(&mut self, ops: &mut Vec<RenderOp>) {
        if self.window.open() {
            ops.push(RenderOp::Window(self.window.mode()));
            ops.push(RenderOp::Layout(self.window.layout()));
            ops.push(RenderOp::DesktopVisible(false));
        }
    }

    fn close_window(&mut self, ops: &mut Vec<RenderOp>) {
        if self.window.close() {
            ops.push(RenderOp::Window(WindowMode::Closed));
            ops.push(RenderOp::DesktopVisible(true));
        }
    }

    /// Announce a mode change that brings the window back, and refocus
    fn window_changed(&mut self, focus_delay: f64, now: f64, ops: &mut Vec<RenderOp>) {
        ops.push(RenderOp::Window(self.window.mode()));
        if let Some(id) = self.tabs.active_id().cloned() {
            self.scheduler
                .schedule(focus_delay, now, ScheduledTask::FocusInput(id));
        }
    }

    /// Echo `line` into a session's transcript, run it, and apply the
    /// result
    fn run_line(&mut self, id: &SessionId, line: &str, now: f64, ops: &mut Vec<RenderOp>) {
        let theme = self.themes.current();
        let Some(session) = self.tabs.get_mut(id) else {
            return;
        };

        ops.push(RenderOp::CommandEcho {
            id: id.clone(),
            prompt: self.config.prompt.clone(),
            line: line.to_string(),
        });

        let execution = self.interpreter.execute(line, &mut session.state, theme);
        match execution.output {
            CommandOutput::Text(markup) => ops.push(RenderOp::Output {
                id: id.clone(),
                markup,
            }),
            CommandOutput::Silent => {}
            CommandOutput::Clear => ops.push(RenderOp::ClearTranscript { id: id.clone() }),
        }

        for effect in execution.effects {
            self.apply_effect(id, effect, now, ops);
        }
    }

    fn apply_effect(&mut self, id: &SessionId, effect: Effect, now: f64, ops: &mut Vec<RenderOp>) {
        match effect {
            Effect::CloseSession => {
                if self.pending_exits.contains_key(id) {
                    return;
                }
                let task = self.scheduler.schedule(
                    self.config.exit_delay_ms,
                    now,
                    ScheduledTask::CloseSession(id.clone()),
                );
                self.pending_exits.insert(id.clone(), task);
            }
            Effect::OpenUrl { url, target } => ops.push(RenderOp::OpenUrl { url, target }),
            Effect::SetTheme(theme) => {
                self.themes.set(theme);
                ops.push(RenderOp::Theme(theme));
            }
            Effect::Flourish => {
                let start = self.config.flourish_delay_ms;
                let end = start + self.config.flourish_duration_ms;
                self.scheduler
                    .schedule(start, now, ScheduledTask::StartFlourish);
                self.scheduler.schedule(end, now, ScheduledTask::EndFlourish);
            }
        }
    }
}
