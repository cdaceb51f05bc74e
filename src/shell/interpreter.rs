//! Command interpreter
//!
//! Parses a submitted line, looks the command up and runs it against the
//! submitting session. The interpreter owns the registry and the
//! filesystem; sessions are passed in per call so every tab shares one
//! interpreter.

use super::markup::{escape, highlight};
use super::parser;
use super::registry::{CommandContext, CommandOutput, CommandRegistry, Effect};
use super::session::SessionState;
use crate::config::ShellConfig;
use crate::theme::Theme;
use crate::vfs::VirtualFs;
use chrono::Local;

/// Result of running one line
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub output: CommandOutput,
    pub effects: Vec<Effect>,
}

impl Execution {
    fn output(output: CommandOutput) -> Self {
        Self {
            output,
            effects: Vec::new(),
        }
    }
}

pub struct Interpreter {
    registry: CommandRegistry,
    fs: VirtualFs,
    user: String,
    history_display: usize,
}

impl Interpreter {
    pub fn new(registry: CommandRegistry, fs: VirtualFs) -> Self {
        Self {
            registry,
            fs,
            user: "emily".to_string(),
            history_display: 20,
        }
    }

    /// Built-in commands over the seeded filesystem, configured from `config`
    pub fn from_config(config: &ShellConfig) -> Self {
        let mut interp = Self::new(CommandRegistry::with_builtins(), VirtualFs::seeded());
        interp.user = config.user.clone();
        interp.history_display = config.history_display;
        interp
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    /// Run `line` in `session`. Blank lines do nothing.
    pub fn execute(&self, line: &str, session: &mut SessionState, theme: Theme) -> Execution {
        let Some(invocation) = parser::parse(line) else {
            return Execution::output(CommandOutput::Silent);
        };

        let Some(spec) = self.registry.get(&invocation.name) else {
            log::debug!("unknown command: {}", invocation.name);
            return Execution::output(CommandOutput::text(format!(
                "{}: command not found. Type 'help' for available commands.",
                highlight(&escape(&invocation.name))
            )));
        };

        log::trace!("run {} {:?} in {}", spec.name, invocation.args, session.cwd);
        let mut ctx = CommandContext::new(session, &self.fs, &self.registry)
            .with_theme(theme)
            .with_user(&self.user)
            .with_history_display(self.history_display)
            .with_now(Local::now());
        let output = (spec.run)(&invocation.args, &mut ctx);

        Execution {
            output,
            effects: ctx.into_effects(),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}
