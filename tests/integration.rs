//! Integration tests for cozyterm
//!
//! Tests end-to-end behavior across the shell, the content tree and the
//! desktop, through the public API only.

use cozyterm::desktop::{CloseOutcome, Desktop, SessionId, SessionKind, TabManager, UiEvent, WindowMode};
use cozyterm::input::KeyInput;
use cozyterm::prefs::{MemoryStore, PreferenceStore};
use cozyterm::shell::{CommandOutput, Effect, Interpreter, SessionState};
use cozyterm::theme::{Theme, ThemeManager};
use cozyterm::vfs::{self, VirtualFs, ROOT};
use cozyterm::{RenderOp, ShellConfig};

/// Run a line in `session` and return its markup ("" for silent output)
fn run(interp: &Interpreter, session: &mut SessionState, line: &str) -> String {
    let execution = interp.execute(line, session, Theme::Meadow);
    match execution.output {
        CommandOutput::Text(markup) => markup,
        CommandOutput::Silent | CommandOutput::Clear => String::new(),
    }
}

fn booted() -> Desktop {
    let mut desktop = Desktop::new(ShellConfig::default(), Box::new(MemoryStore::new()));
    desktop.boot(0.0);
    desktop
}

fn type_line(desktop: &mut Desktop, line: &str, now: f64) -> Vec<RenderOp> {
    let mut ops = Vec::new();
    for key in KeyInput::typed(line) {
        ops.extend(desktop.handle_key(&key, now).unwrap_or_default());
    }
    ops.extend(
        desktop
            .handle_key(&KeyInput::new("Enter"), now)
            .unwrap_or_default(),
    );
    ops
}

/// Tiny deterministic generator for sequence tests
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

// ============================================================================
// Path Resolution
// ============================================================================

#[test]
fn test_resolution_identities() {
    let fs = VirtualFs::seeded();
    for node in fs.iter().filter(|n| n.is_dir()) {
        let cwd = node.path.as_str();
        assert_eq!(vfs::resolve("", cwd), cwd);
        assert_eq!(vfs::resolve(".", cwd), cwd);
        assert_eq!(vfs::resolve("~", cwd), ROOT);
        assert_eq!(vfs::resolve("..", cwd), vfs::parent(cwd));
        assert_eq!(vfs::resolve("~/about.txt", cwd), "~/about.txt");
    }
    assert_eq!(vfs::resolve("..", ROOT), ROOT);
    assert_eq!(vfs::resolve("projects/", ROOT), "~/projects");
}

#[test]
fn test_cd_pwd_round_trip_over_seed_dirs() {
    let interp = Interpreter::default();
    let fs = VirtualFs::seeded();

    for node in fs.iter().filter(|n| n.is_dir()) {
        let mut session = SessionState::default();
        assert_eq!(run(&interp, &mut session, &format!("cd {}", node.path)), "");
        assert_eq!(run(&interp, &mut session, "pwd"), node.path);
    }
}

#[test]
fn test_relative_navigation() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();

    run(&interp, &mut session, "cd projects");
    run(&interp, &mut session, "cd pixietown/");
    assert_eq!(session.cwd, "~/projects/pixietown");
    run(&interp, &mut session, "cd ..");
    run(&interp, &mut session, "cd ..");
    run(&interp, &mut session, "cd ..");
    assert_eq!(session.cwd, ROOT);
    run(&interp, &mut session, "cd skills/tools");
    run(&interp, &mut session, "cd");
    assert_eq!(session.cwd, ROOT);
}

// ============================================================================
// Command Errors
// ============================================================================

#[test]
fn test_cat_on_every_directory() {
    let interp = Interpreter::default();
    let fs = VirtualFs::seeded();

    for node in fs.iter().filter(|n| n.is_dir()) {
        let mut session = SessionState::default();
        assert_eq!(
            run(&interp, &mut session, &format!("cat {}", node.path)),
            format!("cat: {}: Is a directory", node.path)
        );
    }
}

#[test]
fn test_cd_on_every_file() {
    let interp = Interpreter::default();
    let fs = VirtualFs::seeded();

    for node in fs.iter().filter(|n| n.is_file()) {
        let mut session = SessionState::default();
        assert_eq!(
            run(&interp, &mut session, &format!("cd {}", node.path)),
            format!("cd: {}: Not a directory", node.path)
        );
        assert_eq!(session.cwd, ROOT);
    }
}

#[test]
fn test_missing_paths() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    assert_eq!(
        run(&interp, &mut session, "cat nope.txt"),
        "cat: nope.txt: No such file or directory"
    );
    assert_eq!(
        run(&interp, &mut session, "cd nowhere"),
        "cd: nowhere: No such file or directory"
    );
}

#[test]
fn test_unknown_command_message() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    let out = run(&interp, &mut session, "frobnicate --hard");
    assert!(out.ends_with(": command not found. Type 'help' for available commands."));
    assert!(out.contains("frobnicate"));
}

#[test]
fn test_help_for_command() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    assert_eq!(
        run(&interp, &mut session, "help ls"),
        "ls: List directory contents\nUsage: ls [path]"
    );
    // aliases and case resolve to the same entry
    assert!(run(&interp, &mut session, "HELP dir").starts_with("dir: List directory contents"));
}

#[test]
fn test_names_are_case_insensitive() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    assert_eq!(run(&interp, &mut session, "PWD"), ROOT);
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_history_bound_through_editor() {
    let config = ShellConfig {
        max_history: 5,
        ..ShellConfig::default()
    };
    let mut desktop = Desktop::new(config, Box::new(MemoryStore::new()));
    desktop.boot(0.0);

    for i in 0..12 {
        type_line(&mut desktop, &format!("echo {}", i), 0.0);
    }

    let home = desktop.tabs().get(&SessionId::home()).unwrap();
    assert_eq!(home.state.history.len(), 5);
    assert_eq!(home.state.history.get(0), Some("echo 11"));
    assert_eq!(home.state.history.get(4), Some("echo 7"));
}

#[test]
fn test_history_recall_roundtrip() {
    let mut desktop = booted();
    type_line(&mut desktop, "pwd", 0.0);
    type_line(&mut desktop, "whoami", 0.0);

    let up = KeyInput::new("ArrowUp");
    desktop.handle_key(&up, 0.0);
    let ops = desktop.handle_key(&up, 0.0).unwrap();
    assert!(ops.contains(&RenderOp::Input {
        id: SessionId::home(),
        text: "pwd".into(),
        caret: 3,
    }));

    let ops = type_line(&mut desktop, "", 0.0);
    assert!(ops.iter().any(|op| matches!(op, RenderOp::Output { markup, .. } if markup == "~")));
}

#[test]
fn test_blank_lines_not_recorded() {
    let mut desktop = booted();
    type_line(&mut desktop, "   ", 0.0);
    let home = desktop.tabs().get(&SessionId::home()).unwrap();
    assert!(home.state.history.is_empty());
}

// ============================================================================
// Tabs
// ============================================================================

#[test]
fn test_successor_rule() {
    let mut tabs = TabManager::default();
    tabs.open(SessionKind::Home);
    let ids: Vec<SessionId> = (0..4).map(|_| tabs.open(SessionKind::Terminal).id).collect();

    // active in the middle: the right neighbor takes over
    tabs.activate(&ids[1]);
    assert_eq!(
        tabs.close(&ids[1]),
        CloseOutcome::Closed {
            activated: Some(ids[2].clone())
        }
    );

    // active at the end: the new last tab takes over
    tabs.activate(&ids[3]);
    assert_eq!(
        tabs.close(&ids[3]),
        CloseOutcome::Closed {
            activated: Some(ids[2].clone())
        }
    );
}

#[test]
fn test_exclusive_activation_after_arbitrary_sequences() {
    let mut rng = Lcg(7);
    let mut desktop = booted();
    let mut now = 0.0;

    for _ in 0..400 {
        now += 10.0;
        let ids = desktop.tabs().ids();
        match rng.next(7) {
            0 => {
                desktop.handle(UiEvent::NewTabClicked, now);
            }
            1 if !ids.is_empty() => {
                let id = ids[rng.next(ids.len())].clone();
                desktop.handle(UiEvent::TabCloseClicked(id), now);
            }
            2 if !ids.is_empty() => {
                let id = ids[rng.next(ids.len())].clone();
                desktop.handle(UiEvent::TabClicked(id), now);
            }
            3 => {
                desktop.handle_key(&KeyInput::new("Tab").ctrl(), now);
            }
            4 => {
                let n = (rng.next(9) + 1).to_string();
                desktop.handle_key(&KeyInput::new(n).meta(), now);
            }
            5 => {
                type_line(&mut desktop, "exit", now);
            }
            _ => {
                desktop.handle(UiEvent::DesktopIconOpened, now);
            }
        }
        desktop.tick(now);

        let tabs = desktop.tabs();
        let active = tabs.iter().filter(|s| tabs.is_active(s.id())).count();
        if tabs.is_empty() {
            assert_eq!(active, 0);
            assert_eq!(desktop.window().mode(), WindowMode::Closed);
        } else {
            assert_eq!(active, 1);
        }
    }
}

#[test]
fn test_exit_closes_tab_after_delay() {
    let mut desktop = booted();
    desktop.handle(UiEvent::NewTabClicked, 0.0);
    let term = SessionId::new("term-1");

    type_line(&mut desktop, "exit", 1000.0);
    assert!(desktop.tabs().contains(&term));
    desktop.tick(1499.0);
    assert!(desktop.tabs().contains(&term));
    desktop.tick(1500.0);
    assert!(!desktop.tabs().contains(&term));
}

#[test]
fn test_closing_last_tab_closes_window() {
    let mut desktop = booted();
    for id in desktop.tabs().ids() {
        desktop.handle(UiEvent::TabCloseClicked(id), 0.0);
    }
    assert_eq!(desktop.window().mode(), WindowMode::Closed);

    // keys fall through while closed
    assert!(desktop.handle_key(&KeyInput::new("a"), 0.0).is_none());
}

// ============================================================================
// Theme
// ============================================================================

/// Store handle that tests can inspect after the desktop owns a clone
#[derive(Clone, Default)]
struct SharedStore(std::rc::Rc<std::cell::RefCell<MemoryStore>>);

impl PreferenceStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> cozyterm::Result<()> {
        self.0.borrow_mut().set(key, value)
    }
}

#[test]
fn test_theme_persists_across_reload() {
    let store = SharedStore::default();
    let mut desktop = Desktop::new(ShellConfig::default(), Box::new(store.clone()));
    desktop.boot(0.0);
    type_line(&mut desktop, "theme rainy", 0.0);

    let reloaded = ThemeManager::load(Box::new(store.clone()), "cozyterm-theme");
    assert_eq!(reloaded.current(), Theme::Rainy);

    let mut desktop = Desktop::new(ShellConfig::default(), Box::new(store));
    let ops = desktop.boot(0.0);
    assert_eq!(ops.first(), Some(&RenderOp::Theme(Theme::Rainy)));
}

#[test]
fn test_unknown_theme_rejected() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    let execution = interp.execute("theme disco", &mut session, Theme::Meadow);

    assert!(execution.effects.is_empty());
    let out = execution.output.markup().unwrap_or_default().to_string();
    assert!(out.contains("unknown theme"));
    assert!(out.contains("meadow, rainy"));
}

#[test]
fn test_theme_command_effect() {
    let interp = Interpreter::default();
    let mut session = SessionState::default();
    let execution = interp.execute("theme rainy", &mut session, Theme::Meadow);
    assert_eq!(execution.effects, vec![Effect::SetTheme(Theme::Rainy)]);
}
