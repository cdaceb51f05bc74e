//! Shell - Command-line interpreter
//!
//! The portfolio shell that runs inside each terminal tab. Features:
//! - Whitespace-split command lines, case-insensitive command names
//! - A registry of built-in commands with aliases and help categories
//! - Per-session working directory and bounded history
//! - A line editor with history recall and command-name completion
//!
//! Output is markup (see [`markup`]); side effects such as closing a tab or
//! opening a link are returned as [`Effect`]s for the desktop to apply.

pub mod editor;
pub mod interpreter;
pub mod markup;
pub mod parser;
pub mod programs;
pub mod registry;
pub mod session;

pub use editor::{EditorAction, InputEditor, LineBuffer};
pub use interpreter::{Execution, Interpreter};
pub use parser::{parse, Invocation};
pub use registry::{
    Category, CommandContext, CommandFn, CommandOutput, CommandRegistry, CommandSpec, Effect,
    LinkTarget,
};
pub use session::{History, Recall, SessionState};
