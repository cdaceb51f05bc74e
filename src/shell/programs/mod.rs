//! Shell programs
//!
//! This module contains all the built-in commands available in the shell.
//! Commands are organized by category for maintainability; each one is a
//! `prog_*` function registered by [`register_all`].

use super::registry::{Category, CommandRegistry, CommandSpec, CommandFn};

// Program modules by category
pub mod content;
pub mod fs;
pub mod fun;
pub mod links;
pub mod shell;

// Re-export all program functions for the registry
pub use content::*;
pub use fs::*;
pub use fun::*;
pub use links::*;
pub use shell::*;

/// (name, description, usage, category, handler)
type Entry = (&'static str, &'static str, &'static str, Category, CommandFn);

const BUILTINS: &[Entry] = &[
    // navigation
    ("ls", "List directory contents", "ls [path]", Category::Navigation, prog_ls),
    ("cat", "Display file contents", "cat <file>", Category::Navigation, prog_cat),
    ("cd", "Change directory", "cd <directory>", Category::Navigation, prog_cd),
    ("pwd", "Print working directory", "pwd", Category::Navigation, prog_pwd),
    ("clear", "Clear the terminal", "clear", Category::Navigation, prog_clear),
    ("help", "Show available commands", "help [command]", Category::Navigation, prog_help),
    // links
    ("open", "Open a file or link", "open <file>", Category::Links, prog_open),
    ("github", "Show GitHub profile", "github", Category::Links, prog_github),
    ("linkedin", "Show LinkedIn profile", "linkedin", Category::Links, prog_linkedin),
    ("email", "Send an email", "email", Category::Links, prog_email),
    // fun stuff
    ("ask", "Ask a question (natural language)", "ask <question>", Category::Fun, prog_ask),
    ("search", "Search content for keywords", "search <keyword>", Category::Fun, prog_search),
    ("theme", "Change color theme", "theme [meadow|rainy]", Category::Fun, prog_theme),
    ("coffee", "Brew some coffee", "coffee", Category::Fun, prog_coffee),
    ("fortune", "Get a random fortune", "fortune", Category::Fun, prog_fortune),
    ("cowsay", "Have a cow say something", "cowsay <message>", Category::Fun, prog_cowsay),
    ("neofetch", "Display system info", "neofetch", Category::Fun, prog_neofetch),
    ("party", "Start a party", "party", Category::Fun, prog_party),
    // utilities
    ("history", "Show command history", "history", Category::Utilities, prog_history),
    ("date", "Display current date and time", "date", Category::Utilities, prog_date),
    ("exit", "Close the terminal", "exit", Category::Utilities, prog_exit),
    ("whoami", "Display current user", "whoami", Category::Utilities, prog_whoami),
    ("echo", "Display a line of text", "echo <text>", Category::Utilities, prog_echo),
    // other
    ("hi", "Say hello", "hi", Category::Other, prog_hi),
    ("sudo", "Superuser do", "sudo <command>", Category::Other, prog_sudo),
    ("matrix", "Enter the matrix", "matrix", Category::Other, prog_matrix),
    ("claude", "Talk to Claude", "claude <message>", Category::Other, prog_claude),
    ("chatgpt", "Wrong AI", "chatgpt", Category::Other, prog_chatgpt),
];

const ALIASES: &[(&str, &str)] = &[
    ("dir", "ls"),
    ("?", "help"),
    ("hello", "hi"),
    ("hey", "hi"),
    ("ai", "claude"),
];

/// Register every built-in command and alias
pub fn register_all(registry: &mut CommandRegistry) {
    for &(name, description, usage, category, run) in BUILTINS {
        registry.register(CommandSpec {
            name,
            description,
            usage,
            category,
            run,
        });
    }
    for &(alias, target) in ALIASES {
        registry.alias(alias, target);
    }
}

// ============ Shared Utilities ============

/// Pick one of `options` at random. Falls back to the first option if the
/// platform has no entropy source.
pub fn pick<'s>(options: &[&'s str]) -> &'s str {
    let mut bytes = [0u8; 4];
    let roll = match getrandom::fill(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes) as usize,
        Err(e) => {
            log::debug!("getrandom unavailable: {}", e);
            0
        }
    };
    if options.is_empty() {
        return "";
    }
    options[roll % options.len()]
}

/// Join arguments back into the text the user typed
pub fn joined(args: &[String]) -> String {
    args.join(" ")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::super::registry::{CommandContext, CommandOutput, CommandRegistry, Effect};
    use super::super::session::SessionState;
    use crate::vfs::VirtualFs;

    /// Runs commands against the seeded filesystem with a shared session
    pub struct Harness {
        pub fs: VirtualFs,
        pub registry: CommandRegistry,
        pub session: SessionState,
        pub effects: Vec<Effect>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                fs: VirtualFs::seeded(),
                registry: CommandRegistry::with_builtins(),
                session: SessionState::default(),
                effects: Vec::new(),
            }
        }

        pub fn run(&mut self, name: &str, args: &[&str]) -> CommandOutput {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            let spec = *self.registry.get(name).expect("command registered");
            let mut ctx = CommandContext::new(&mut self.session, &self.fs, &self.registry);
            let output = (spec.run)(&args, &mut ctx);
            self.effects = ctx.into_effects();
            output
        }

        /// Run and return the markup, panicking on Silent/Clear
        pub fn text(&mut self, name: &str, args: &[&str]) -> String {
            match self.run(name, args) {
                CommandOutput::Text(m) => m,
                other => panic!("expected text from {}, got {:?}", name, other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_returns_an_option() {
        let options = ["a", "b", "c"];
        for _ in 0..20 {
            assert!(options.contains(&pick(&options)));
        }
        assert_eq!(pick(&[]), "");
    }

    #[test]
    fn test_all_aliases_resolve() {
        let reg = CommandRegistry::with_builtins();
        for (alias, target) in ALIASES {
            assert_eq!(reg.get(alias).map(|s| s.name), Some(*target));
        }
        assert_eq!(reg.len(), BUILTINS.len());
    }
}
