//! Filesystem navigation programs
//!
//! - `ls`: list a directory (directories highlighted)
//! - `cat`: print a file
//! - `cd`: change the session's working directory
//! - `pwd`: print it

use crate::shell::markup::{escape, highlight};
use crate::shell::registry::{CommandContext, CommandOutput};
use crate::vfs::{FsError, ROOT};

/// ls - list directory contents
pub fn prog_ls(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let target = args.first().map(String::as_str).unwrap_or(".");
    let path = ctx.resolve(target);

    let Some(node) = ctx.fs.lookup(&path) else {
        return CommandOutput::text(format!(
            "ls: cannot access '{}': {}",
            escape(target),
            FsError::NotFound
        ));
    };

    if node.is_file() {
        return CommandOutput::text(escape(args.first().map_or(node.name(), String::as_str)));
    }

    let listing: Vec<String> = node
        .children()
        .iter()
        .map(|child| {
            if child.ends_with('/') {
                highlight(child)
            } else {
                child.clone()
            }
        })
        .collect();

    if listing.is_empty() {
        CommandOutput::Silent
    } else {
        CommandOutput::text(listing.join("  "))
    }
}

/// cat - display file contents
pub fn prog_cat(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let Some(target) = args.first() else {
        return CommandOutput::text("cat: missing file operand");
    };

    let path = ctx.resolve(target);
    match ctx.fs.read_file(&path) {
        Ok(content) => CommandOutput::text(content),
        Err(e) => CommandOutput::text(format!("cat: {}: {}", escape(target), e)),
    }
}

/// cd - change directory
pub fn prog_cd(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let target = match args.first() {
        None => ROOT,
        Some(t) if t == ROOT => ROOT,
        Some(t) => t.as_str(),
    };

    let path = ctx.resolve(target);
    match ctx.fs.directory(&path) {
        Ok(_) => {
            ctx.session.cwd = path;
            CommandOutput::Silent
        }
        Err(e) => CommandOutput::text(format!("cd: {}: {}", escape(target), e)),
    }
}

/// pwd - print working directory
pub fn prog_pwd(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    CommandOutput::text(escape(&ctx.session.cwd))
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use crate::shell::registry::CommandOutput;

    #[test]
    fn test_ls_root() {
        let mut h = Harness::new();
        let out = h.text("ls", &[]);
        assert!(out.contains("about.txt"));
        assert!(out.contains("<span class=\"highlight\">projects/</span>"));
        assert!(out.contains("  "));
    }

    #[test]
    fn test_ls_missing() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("ls", &["nope"]),
            "ls: cannot access 'nope': No such file or directory"
        );
    }

    #[test]
    fn test_ls_file_echoes_argument() {
        let mut h = Harness::new();
        assert_eq!(h.text("ls", &["about.txt"]), "about.txt");
    }

    #[test]
    fn test_cat_file() {
        let mut h = Harness::new();
        let out = h.text("cat", &["about.txt"]);
        assert!(!out.is_empty());
        assert!(!out.contains("No such file"));
    }

    #[test]
    fn test_cat_errors() {
        let mut h = Harness::new();
        assert_eq!(h.text("cat", &[]), "cat: missing file operand");
        assert_eq!(
            h.text("cat", &["missing.txt"]),
            "cat: missing.txt: No such file or directory"
        );
        assert_eq!(h.text("cat", &["projects"]), "cat: projects: Is a directory");
    }

    #[test]
    fn test_cd_and_pwd() {
        let mut h = Harness::new();
        assert_eq!(h.run("cd", &["projects/"]), CommandOutput::Silent);
        assert_eq!(h.text("pwd", &[]), "~/projects");
        assert_eq!(h.run("cd", &[".."]), CommandOutput::Silent);
        assert_eq!(h.text("pwd", &[]), "~");
    }

    #[test]
    fn test_cd_home_shortcuts() {
        let mut h = Harness::new();
        h.run("cd", &["projects"]);
        h.run("cd", &[]);
        assert_eq!(h.session.cwd, "~");
        h.run("cd", &["projects"]);
        h.run("cd", &["~"]);
        assert_eq!(h.session.cwd, "~");
    }

    #[test]
    fn test_cd_errors_leave_cwd() {
        let mut h = Harness::new();
        assert_eq!(
            h.text("cd", &["about.txt"]),
            "cd: about.txt: Not a directory"
        );
        assert_eq!(
            h.text("cd", &["nowhere"]),
            "cd: nowhere: No such file or directory"
        );
        assert_eq!(h.session.cwd, "~");
    }
}
