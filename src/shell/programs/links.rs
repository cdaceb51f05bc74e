//! Link programs
//!
//! Commands that send the visitor somewhere else: `open` for the resume and
//! project pages, the profile shortcuts, and `theme`, which restyles the
//! page itself.

use crate::shell::markup::escape;
use crate::shell::registry::{CommandContext, CommandOutput, Effect, LinkTarget};
use crate::theme::Theme;

pub const RESUME_URL: &str = "/assets/resume.pdf";
pub const GITHUB_URL: &str = "https://github.com/nEmily";
pub const LINKEDIN_URL: &str = "https://linkedin.com/in/nguyen-emily";
pub const EMAIL_URL: &str = "mailto:emilyn@berkeley.edu";

/// First `Link: http(s)://...` URL in a node's text
pub fn find_link(text: &str) -> Option<&str> {
    text.match_indices("Link: ").find_map(|(i, marker)| {
        let rest = &text[i + marker.len()..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let url = &rest[..end];
        let scheme_ok = url.starts_with("http://") || url.starts_with("https://");
        let has_host = url.split("://").nth(1).is_some_and(|h| !h.is_empty());
        (scheme_ok && has_host).then_some(url)
    })
}

fn open_new_tab(ctx: &mut CommandContext<'_>, url: &str) {
    ctx.effect(Effect::OpenUrl {
        url: url.to_string(),
        target: LinkTarget::NewTab,
    });
}

/// open - open a file or link
pub fn prog_open(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let Some(target) = args.first() else {
        return CommandOutput::text("open: missing file operand");
    };

    let path = ctx.resolve(target);
    if target == "resume.pdf" || path == "~/resume.pdf" {
        open_new_tab(ctx, RESUME_URL);
        return CommandOutput::text("Opening resume.pdf...");
    }

    let link = ctx
        .fs
        .lookup(&path)
        .and_then(|node| node.text())
        .and_then(find_link)
        .map(str::to_string);

    match link {
        Some(url) => {
            open_new_tab(ctx, &url);
            CommandOutput::text(format!("Opening {}...", escape(&url)))
        }
        None => CommandOutput::text(format!("open: {}: Cannot open file", escape(target))),
    }
}

/// github - show GitHub profile
pub fn prog_github(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    open_new_tab(ctx, GITHUB_URL);
    CommandOutput::text("Opening github.com/nEmily...")
}

/// linkedin - show LinkedIn profile
pub fn prog_linkedin(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    open_new_tab(ctx, LINKEDIN_URL);
    CommandOutput::text("Opening LinkedIn...")
}

/// email - send an email
pub fn prog_email(_args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    ctx.effect(Effect::OpenUrl {
        url: EMAIL_URL.to_string(),
        target: LinkTarget::SameWindow,
    });
    CommandOutput::text("Opening mail client...")
}

/// theme - show or change the color theme
pub fn prog_theme(args: &[String], ctx: &mut CommandContext<'_>) -> CommandOutput {
    let Some(name) = args.first() else {
        return CommandOutput::text(format!(
            "Current theme: {}\nAvailable: {}",
            ctx.theme,
            Theme::available()
        ));
    };

    match name.parse::<Theme>() {
        Ok(theme) => {
            ctx.effect(Effect::SetTheme(theme));
            CommandOutput::text(format!("Theme set to {}", theme))
        }
        Err(_) => CommandOutput::text(format!(
            "theme: unknown theme '{}'\nAvailable: {}",
            escape(name),
            Theme::available()
        )),
    }
}
