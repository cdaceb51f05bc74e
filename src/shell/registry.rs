//! Command registry
//!
//! Maps command names (and aliases) to their handlers. Handlers are plain
//! functions that read their arguments and a [`CommandContext`], and return
//! a [`CommandOutput`]. Anything a command wants done outside the shell
//! (closing its tab, opening a link, switching theme) is queued on the
//! context as an [`Effect`] for the desktop to carry out.

use super::session::SessionState;
use crate::theme::Theme;
use crate::vfs::{self, VirtualFs};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;

/// Signature of a command handler
pub type CommandFn = fn(&[String], &mut CommandContext<'_>) -> CommandOutput;

/// What a command prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Markup to append to the transcript
    Text(String),
    /// Nothing to show
    Silent,
    /// Wipe the transcript
    Clear,
}

impl CommandOutput {
    pub fn text(markup: impl Into<String>) -> Self {
        CommandOutput::Text(markup.into())
    }

    /// Markup, if there is any
    pub fn markup(&self) -> Option<&str> {
        match self {
            CommandOutput::Text(m) => Some(m),
            _ => None,
        }
    }
}

/// Where a link should open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    NewTab,
    SameWindow,
}

/// Requests a command makes of the environment
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Close the issuing session after the configured delay
    CloseSession,
    OpenUrl { url: String, target: LinkTarget },
    SetTheme(Theme),
    /// Brief celebratory animation
    Flourish,
}

/// Help groupings, in the order `help` lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Navigation,
    Links,
    Fun,
    Utilities,
    Other,
}

impl Category {
    pub const ORDER: [Category; 5] = [
        Category::Navigation,
        Category::Links,
        Category::Fun,
        Category::Utilities,
        Category::Other,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::Links => "links",
            Category::Fun => "fun stuff",
            Category::Utilities => "utilities",
            Category::Other => "other",
        }
    }
}

/// A registered command
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub category: Category,
    pub run: CommandFn,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Everything a command may look at or change while it runs
pub struct CommandContext<'a> {
    /// The issuing session
    pub session: &'a mut SessionState,
    pub fs: &'a VirtualFs,
    pub registry: &'a CommandRegistry,
    /// Theme in effect when the command started
    pub theme: Theme,
    /// Owner of the shell, for prompts and `whoami`
    pub user: &'a str,
    /// How many history entries `history` shows
    pub history_display: usize,
    pub now: DateTime<Local>,
    effects: Vec<Effect>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        session: &'a mut SessionState,
        fs: &'a VirtualFs,
        registry: &'a CommandRegistry,
    ) -> Self {
        Self {
            session,
            fs,
            registry,
            theme: Theme::default(),
            user: "emily",
            history_display: 20,
            now: Local::now(),
            effects: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_user(mut self, user: &'a str) -> Self {
        self.user = user;
        self
    }

    pub fn with_history_display(mut self, count: usize) -> Self {
        self.history_display = count;
        self
    }

    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Resolve a path argument against the session's cwd
    pub fn resolve(&self, input: &str) -> String {
        vfs::resolve(input, &self.session.cwd)
    }

    pub fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}

/// Command lookup table
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandSpec>,
    aliases: HashMap<&'static str, &'static str>,
    /// Registration order, used for help listings
    order: Vec<&'static str>,
}

impl CommandRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in command and alias
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::programs::register_all(&mut registry);
        registry
    }

    /// Add or replace a command
    pub fn register(&mut self, spec: CommandSpec) {
        if self.commands.insert(spec.name, spec).is_none() {
            self.order.push(spec.name);
        }
    }

    /// Make `alias` another name for `target`. Returns false if `target`
    /// isn't registered.
    pub fn alias(&mut self, alias: &'static str, target: &'static str) -> bool {
        if !self.commands.contains_key(target) {
            log::warn!("alias {} -> {}: no such command", alias, target);
            return false;
        }
        self.aliases.insert(alias, target);
        true
    }

    /// Look up a command or alias, case-insensitively
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        let name = name.to_lowercase();
        let name = self
            .aliases
            .get(name.as_str())
            .copied()
            .unwrap_or(name.as_str());
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every invocable name, aliases included, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .commands
            .keys()
            .chain(self.aliases.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names
    }

    /// Invocable names starting with `prefix`
    pub fn completions(&self, prefix: &str) -> Vec<&'static str> {
        self.names()
            .into_iter()
            .filter(|n| n.starts_with(prefix))
            .collect()
    }

    /// Commands in a category, in registration order
    pub fn in_category(&self, category: Category) -> Vec<&CommandSpec> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .filter(|spec| spec.category == category)
            .collect()
    }

    /// Number of commands, not counting aliases
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prog_noop(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
        CommandOutput::Silent
    }

    fn spec(name: &'static str, category: Category) -> CommandSpec {
        CommandSpec {
            name,
            description: "does nothing",
            usage: name,
            category,
            run: prog_noop,
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("ls", Category::Navigation));
        assert!(reg.contains("ls"));
        assert!(reg.contains("LS"));
        assert!(!reg.contains("rm"));
    }

    #[test]
    fn test_alias() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("ls", Category::Navigation));
        assert!(reg.alias("dir", "ls"));
        assert!(!reg.alias("x", "missing"));
        assert_eq!(reg.get("dir").map(|s| s.name), Some("ls"));
        assert_eq!(reg.names(), vec!["dir", "ls"]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_category_order_follows_registration() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("pwd", Category::Navigation));
        reg.register(spec("ls", Category::Navigation));
        reg.register(spec("open", Category::Links));
        reg.register(spec("pwd", Category::Navigation));

        let nav: Vec<_> = reg
            .in_category(Category::Navigation)
            .iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(nav, vec!["pwd", "ls"]);
    }

    #[test]
    fn test_completions() {
        let mut reg = CommandRegistry::new();
        reg.register(spec("cat", Category::Navigation));
        reg.register(spec("cd", Category::Navigation));
        reg.register(spec("pwd", Category::Navigation));
        assert_eq!(reg.completions("c"), vec!["cat", "cd"]);
        assert_eq!(reg.completions("p"), vec!["pwd"]);
        assert!(reg.completions("z").is_empty());
    }

    #[test]
    fn test_builtins_cover_every_category() {
        let reg = CommandRegistry::with_builtins();
        for category in Category::ORDER {
            assert!(!reg.in_category(category).is_empty(), "{:?}", category);
        }
    }

    #[test]
    fn test_context_effects() {
        let fs = VirtualFs::seeded();
        let reg = CommandRegistry::new();
        let mut session = SessionState::default();
        let mut ctx = CommandContext::new(&mut session, &fs, &reg);
        ctx.effect(Effect::Flourish);
        assert_eq!(ctx.effects(), &[Effect::Flourish]);
        assert_eq!(ctx.into_effects(), vec![Effect::Flourish]);
    }
}
