//! Inline markup for command output
//!
//! Output is HTML-ish text: plain lines plus `<span class="...">` runs that
//! the renderer styles. Three classes are used: `comment`, `highlight` and
//! `command`. Anything user-typed that ends up in output goes through
//! [`escape`] first.

/// Span classes the renderer knows how to style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Comment,
    Highlight,
    Command,
}

impl Style {
    pub fn class(&self) -> &'static str {
        match self {
            Style::Comment => "comment",
            Style::Highlight => "highlight",
            Style::Command => "command",
        }
    }
}

/// Wrap already-safe text in a styled span
pub fn span(style: Style, text: &str) -> String {
    format!("<span class=\"{}\">{}</span>", style.class(), text)
}

pub fn comment(text: &str) -> String {
    span(Style::Comment, text)
}

pub fn highlight(text: &str) -> String {
    span(Style::Highlight, text)
}

pub fn command(text: &str) -> String {
    span(Style::Command, text)
}

/// Escape text for inclusion in markup
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Reduce markup to plain text for terminals that can't style it
pub fn to_plain(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
