//! cozyterm CLI - the desktop on a plain terminal
//!
//! Run with: cargo run --bin cozyterm-cli -- [--config FILE] [--prefs FILE]
//!
//! Lines are typed into the active tab and submitted. Lines starting with
//! `:` drive the window and tabs instead (`:help` lists them). Deferred
//! work (tab close after `exit`, the party flourish) runs on a real clock,
//! so the CLI waits for it before reading the next line.

use cozyterm::desktop::{Desktop, SessionId, UiEvent, WindowMode};
use cozyterm::input::KeyInput;
use cozyterm::platform::text::TextRenderer;
use cozyterm::platform::Renderer;
use cozyterm::prefs::{JsonFileStore, MemoryStore, PreferenceStore};
use cozyterm::{RenderOp, ShellConfig};
use std::io::{self, BufRead, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const META_HELP: &str = "\
:new            open a terminal tab
:close          close the active tab
:next, :prev    cycle tabs
:tab N          jump to tab N (1-9)
:switch ID      activate a tab by id
:tabs           list tabs
:min, :max      minimize or maximize the window
:restore        restore the window
:close-window   close the window (tabs are kept)
:open           reopen the window from the desktop
:quit           leave";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    prefs: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().ok_or("--config needs a path")?.into()),
            "--prefs" => args.prefs = Some(iter.next().ok_or("--prefs needs a path")?.into()),
            "-h" | "--help" => {
                println!("usage: cozyterm-cli [--config FILE] [--prefs FILE]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&PathBuf>) -> cozyterm::Result<ShellConfig> {
    match path {
        Some(path) => ShellConfig::from_json(&std::fs::read_to_string(path)?),
        None => Ok(ShellConfig::default()),
    }
}

fn open_store(path: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    let Some(path) = path else {
        return Box::new(MemoryStore::new());
    };
    match JsonFileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!(
                "can't use {} for preferences ({}); theme won't persist",
                path.display(),
                e
            );
            Box::new(MemoryStore::new())
        }
    }
}

struct Cli {
    desktop: Desktop,
    renderer: TextRenderer<Stdout>,
    started: Instant,
}

impl Cli {
    fn new(config: ShellConfig, store: Box<dyn PreferenceStore>) -> Self {
        Self {
            desktop: Desktop::new(config, store),
            renderer: TextRenderer::new(io::stdout()),
            started: Instant::now(),
        }
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn show(&mut self, ops: &[RenderOp]) {
        self.renderer.render_all(ops);
    }

    fn event(&mut self, event: UiEvent) {
        let now = self.now();
        let ops = self.desktop.handle(event, now);
        self.show(&ops);
    }

    /// Feed a key; false if the desktop didn't take it
    fn key(&mut self, key: KeyInput) -> bool {
        let now = self.now();
        match self.desktop.handle_key(&key, now) {
            Some(ops) => {
                self.show(&ops);
                true
            }
            None => false,
        }
    }

    /// Type a line into the active tab and press Enter
    fn submit(&mut self, line: &str) {
        for key in KeyInput::typed(line) {
            self.key(key);
        }
        if !self.key(KeyInput::new("Enter")) {
            match self.desktop.window().mode() {
                WindowMode::Closed => println!("[the window is closed; :open brings it back]"),
                WindowMode::Minimized => println!("[the window is minimized; :restore]"),
                WindowMode::Normal | WindowMode::Maximized => {}
            }
        }
    }

    /// Sleep through every pending deferred task
    fn settle(&mut self) {
        while let Some(wait) = self.desktop.next_deadline(self.now()) {
            std::thread::sleep(Duration::from_secs_f64(wait / 1000.0));
            let now = self.now();
            let ops = self.desktop.tick(now);
            self.show(&ops);
        }
    }

    fn list_tabs(&self) {
        let tabs = self.desktop.tabs();
        for (i, session) in tabs.iter().enumerate() {
            let marker = if tabs.is_active(session.id()) { "*" } else { " " };
            println!("{} {} {}", marker, i + 1, session.label());
        }
    }

    /// Handle a `:` command. Returns false to quit.
    fn meta(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("quit" | "q", _) => return false,
            ("help", _) => println!("{}", META_HELP),
            ("new", _) => self.event(UiEvent::NewTabClicked),
            ("close", _) => match self.desktop.tabs().active_id().cloned() {
                Some(id) => self.event(UiEvent::TabCloseClicked(id)),
                None => println!("[no tabs]"),
            },
            ("next", _) => {
                self.key(KeyInput::new("Tab").ctrl());
            }
            ("prev", _) => {
                self.key(KeyInput::new("Tab").ctrl().shift());
            }
            ("tab", Some(n)) if matches!(n.parse::<usize>(), Ok(1..=9)) => {
                self.key(KeyInput::new(n).ctrl());
            }
            ("tab", _) => println!("[:tab takes 1-9]"),
            ("switch", Some(id)) => self.event(UiEvent::TabClicked(SessionId::new(id))),
            ("tabs", _) => self.list_tabs(),
            ("min", _) => self.event(UiEvent::MinimizeButton),
            ("max", _) => self.event(UiEvent::MaximizeButton),
            ("restore", _) => self.event(UiEvent::RestoreButton),
            ("close-window", _) => self.event(UiEvent::CloseButton),
            ("open", _) => self.event(UiEvent::DesktopIconOpened),
            _ => println!("[unknown :{}; try :help]", command),
        }
        true
    }

    fn prompt(&self) -> io::Result<()> {
        if self.desktop.window().mode() == WindowMode::Normal
            || self.desktop.window().mode() == WindowMode::Maximized
        {
            print!("{} ", self.desktop.config().prompt);
        } else {
            print!(": ");
        }
        io::stdout().flush()
    }
}

/// Read and run lines until EOF or `:quit`
fn run(cli: &mut Cli, mut input: impl BufRead) -> io::Result<()> {
    loop {
        cli.prompt()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(command) = line.strip_prefix(':') {
            if !cli.meta(command) {
                return Ok(());
            }
        } else {
            cli.submit(line);
        }
        cli.settle();
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("cozyterm-cli: {}", e);
            std::process::exit(2);
        }
    };
    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cozyterm-cli: {}", e);
            std::process::exit(1);
        }
    };

    let mut cli = Cli::new(config, open_store(args.prefs));
    let now = cli.now();
    let ops = cli.desktop.boot(now);
    cli.show(&ops);
    cli.settle();

    if let Err(e) = run(&mut cli, io::stdin().lock()) {
        eprintln!("cozyterm-cli: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn booted() -> Cli {
        let mut cli = Cli::new(ShellConfig::default(), Box::new(MemoryStore::new()));
        let ops = cli.desktop.boot(0.0);
        cli.show(&ops);
        cli
    }

    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stdin went away"))
        }
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut cli = booted();
        let input = Cursor::new("cd projects\n:quit\npwd\n");
        assert!(run(&mut cli, input).is_ok());

        let home = cli.desktop.tabs().get(&SessionId::home());
        assert_eq!(home.map(|s| s.state.cwd.as_str()), Some("~/projects"));
        assert_eq!(home.map(|s| s.state.history.len()), Some(1));
    }

    #[test]
    fn test_run_ends_at_eof() {
        let mut cli = booted();
        assert!(run(&mut cli, Cursor::new("")).is_ok());
    }

    #[test]
    fn test_run_reports_read_errors() {
        let mut cli = booted();
        let err = run(&mut cli, io::BufReader::new(Broken)).unwrap_err();
        assert_eq!(err.to_string(), "stdin went away");
    }
}
