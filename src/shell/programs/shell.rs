//! Shell utility programs
//!
//! - `help`: list commands, or describe one
//! - `clear`: wipe the transcript
//! - `history`: show recent commands
//! - `date`, `whoami`, `echo`
//! - `exit`: close this tab

use super::joined;
use crate::shell::markup::{command, comment, escape};
use crate::shell::registry::{Category, CommandContext, CommandOutput, Effect};

const SHORTCUTS: &str = "Cmd+T       New tab
Cmd+Shift+W Close tab
Cmd+1-9     Jump to tab
↑/↓         Command history";

/// help - show available commands
pub fn prog_help(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    if let Some(name) = args.first() {
        return match ctx.registry.get(name) {
            Some(spec) => CommandOutput::text(format!(
                "{}: {}\nUsage: {}",
                escape(name),
                spec.description,
                spec.usage
            )),
            None => CommandOutput::text(format!("help: no help for '{}'", escape(name))),
        };
    }

    let mut sections = Vec::new();
    for category in Category::ORDER {
        let specs = ctx.registry.in_category(category);
        if specs.is_empty() {
            continue;
        }
        let lines: Vec<String> = specs
            .iter()
            .map(|spec| format!("{} {}", command(&format!("{:<10}", spec.name)), spec.description))
            .collect();
        sections.push(format!(
            "{}\n{}",
            comment(&format!("# {}", category.heading())),
            lines.join("\n")
        ));
    }
    sections.push(format!("{}\n{}", comment("# keyboard shortcuts"), SHORTCUTS));

    CommandOutput::text(sections.join("\n\n"))
}

/// clear - clear the terminal
pub fn prog_clear(_args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::Clear
}

/// history - show command history, most recent first
pub fn prog_history(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let history = &ctx.session.history;
    if history.is_empty() {
        return CommandOutput::text(comment("# no commands in history"));
    }

    let lines: Vec<String> = history
        .iter()
        .take(ctx.history_display)
        .enumerate()
        .map(|(i, cmd)| format!("{}  {}", comment(&format!("{:>3}", i + 1)), escape(cmd)))
        .collect();
    CommandOutput::text(lines.join("\n"))
}

/// exit - close the terminal
pub fn prog_exit(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    ctx.effect(Effect::CloseSession);
    CommandOutput::text("Goodbye! 👋")
}

/// whoami - display current user
pub fn prog_whoami(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(escape(ctx.user))
}

/// echo - display a line of text
pub fn prog_echo(args: &[String], _ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(escape(&joined(args)))
}

/// date - display current date and time
///
/// Formatted like `Saturday, October 18, 2026 at 09:05:03 PM`.
pub fn prog_date(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(ctx.now.format("%A, %B %-d, %Y at %I:%M:%S %p").to_string())
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use crate::shell::registry::{CommandContext, CommandOutput, CommandRegistry, Effect};
    use crate::shell::session::SessionState;
    use crate::vfs::VirtualFs;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_help_lists_every_category() {
        let mut h = Harness::new();
        let out = h.text("help", &[]);
        for heading in ["# navigation", "# links", "# fun stuff", "# utilities", "# other"] {
            assert!(out.contains(heading), "missing {}", heading);
        }
        assert!(out.contains("# keyboard shortcuts"));
        assert!(out.contains("<span class=\"command\">ls        </span> List directory contents"));
    }

    #[test]
    fn test_help_for_command() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("help", &["ls"]),
            "ls: List directory contents\nUsage: ls [path]"
        );
        assert_eq!(
            h.text("help", &["dir"]),
            "dir: List directory contents\nUsage: ls [path]"
        );
        assert_eq!(h.text("help", &["nope"]), "help: no help for 'nope'");
    }

    #[test]
    fn test_clear() {
        let mut h = Harness::new();
        assert_eq!(h.run("clear", &[]), CommandOutput::Clear);
    }

    #[test]
    fn test_history_empty() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("history", &[]),
            "<span class=\"comment\"># no commands in history</span>"
        );
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut h = Harness::new();
        h.session.history.push("ls");
        h.session.history.push("pwd");
        h.session.history.push("history");

        let out = h.text("history", &[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("<span class=\"comment\">  1</span>"));
        assert!(lines[0].ends_with("history"));
        assert!(lines[2].ends_with("ls"));
    }

    #[test]
    fn test_history_display_limit() {
        let mut h = Harness::new();
        for i in 0..30 {
            h.session.history.push(format!("echo {}", i));
        }
        let out = h.text("history", &[]);
        assert_eq!(out.lines().count(), 20);
        assert!(out.lines().next().is_some_and(|l| l.ends_with("echo 29")));
    }

    #[test]
    fn test_exit_requests_close() {
        let mut h = Harness::new();
        assert_eq!(h.text("exit", &[]), "Goodbye! 👋");
        assert_eq!(h.effects, vec![Effect::CloseSession]);
    }

    #[test]
    fn test_echo_escapes() {
        let mut h = Harness::new();
        assert_eq!(h.text("echo", &["hello", "world"]), "hello world");
        assert_eq!(h.text("echo", &["<b>"]), "&lt;b&gt;");
        assert_eq!(h.text("echo", &[]), "");
    }

    #[test]
    fn test_whoami() {
        let mut h = Harness::new();
        assert_eq!(h.text("whoami", &[]), "emily");
    }

    #[test]
    fn test_date_format() {
        let Some(now) = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).single() else {
            return;
        };
        let fs = VirtualFs::seeded();
        let registry = CommandRegistry::with_builtins();
        let mut session = SessionState::default();
        let mut ctx = CommandContext::new(&mut session, &fs, &registry).with_now(now);
        assert_eq!(
            super::prog_date(&[], &mut ctx),
            CommandOutput::text("Tuesday, March 5, 2024 at 02:07:09 PM")
        );
    }
}
