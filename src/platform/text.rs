//! Plain-text renderer
//!
//! Draws the desktop on a line-oriented stream (stdout for the CLI, a
//! byte buffer in tests):
//! - Every tab keeps its own transcript, like the DOM sections do
//! - Only the active tab's transcript is written; switching tabs replays it
//! - Markup is flattened with [`to_plain`](crate::shell::markup::to_plain)
//! - Window and theme changes show up as bracketed status lines

use super::Renderer;
use crate::desktop::{Layout, RenderOp, SessionId, WindowMode};
use crate::shell::markup;
use crate::shell::LinkTarget;
use std::collections::HashMap;
use std::io::{self, Write};

/// ANSI clear screen + cursor home
const CLEAR: &str = "\x1b[2J\x1b[H";

pub struct TextRenderer<W: Write> {
    out: W,
    transcripts: HashMap<SessionId, Vec<String>>,
    active: Option<SessionId>,
    /// Emit ANSI clear sequences for `clear`
    ansi: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            transcripts: HashMap::new(),
            active: None,
            ansi: true,
        }
    }

    /// Disable ANSI escapes (for pipes and tests)
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    pub fn active(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// Lines recorded for a tab so far
    pub fn transcript(&self, id: &SessionId) -> &[String] {
        self.transcripts.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_active(&self, id: &SessionId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Record a transcript line, writing it if the tab is in front
    fn append(&mut self, id: &SessionId, text: String) -> io::Result<()> {
        if self.is_active(id) {
            writeln!(self.out, "{}", text)?;
        }
        self.transcripts.entry(id.clone()).or_default().push(text);
        Ok(())
    }

    fn status(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "[{}]", text)
    }

    fn apply(&mut self, op: &RenderOp) -> io::Result<()> {
        match op {
            RenderOp::TabOpened { id, .. } => {
                self.transcripts.entry(id.clone()).or_default();
            }
            RenderOp::TabClosed { id } => {
                self.transcripts.remove(id);
                if self.is_active(id) {
                    self.active = None;
                }
                self.status(&format!("closed ~/{}", id))?;
            }
            RenderOp::TabActivated { id, title, .. } => {
                if self.is_active(id) {
                    return Ok(());
                }
                self.active = Some(id.clone());
                writeln!(self.out, "── {} ──", title)?;
                for line in self.transcripts.get(id).into_iter().flatten() {
                    writeln!(self.out, "{}", line)?;
                }
            }
            RenderOp::Banner { id, art } => self.append(id, art.to_string())?,
            RenderOp::CommandEcho { id, prompt, line } => {
                self.append(id, format!("{} {}", prompt, line))?
            }
            RenderOp::Output { id, markup } => self.append(id, markup::to_plain(markup))?,
            RenderOp::ClearTranscript { id } => {
                self.transcripts.insert(id.clone(), Vec::new());
                if self.ansi && self.is_active(id) {
                    write!(self.out, "{}", CLEAR)?;
                }
            }
            // Line-oriented: the input is whatever the user typed
            RenderOp::Input { .. } | RenderOp::Focus { .. } => {}
            RenderOp::Window(mode) => {
                let name = match mode {
                    WindowMode::Closed => "closed",
                    WindowMode::Normal => "normal",
                    WindowMode::Minimized => "minimized",
                    WindowMode::Maximized => "maximized",
                };
                self.status(&format!("window {}", name))?;
            }
            RenderOp::Layout(Layout::Flow) => {}
            RenderOp::Layout(Layout::Positioned(rect)) => {
                self.status(&format!(
                    "window at {:.0},{:.0} {:.0}x{:.0}",
                    rect.x, rect.y, rect.width, rect.height
                ))?;
            }
            RenderOp::DesktopVisible(true) => {
                self.status("desktop: use :open to bring the terminal back")?
            }
            RenderOp::DesktopVisible(false) => {}
            RenderOp::Theme(theme) => self.status(&format!("theme {}", theme))?,
            RenderOp::OpenUrl { url, target } => {
                let place = match target {
                    LinkTarget::NewTab => "new tab",
                    LinkTarget::SameWindow => "this window",
                };
                self.status(&format!("open {} ({})", url, place))?;
            }
            RenderOp::Flourish(true) => writeln!(self.out, "🎉 🎊 🎉 🎊 🎉")?,
            RenderOp::Flourish(false) => {}
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, op: &RenderOp) {
        if let Err(e) = self.apply(op) {
            log::warn!("render failed: {}", e);
        }
    }

    fn render_all(&mut self, ops: &[RenderOp]) {
        for op in ops {
            self.render(op);
        }
        if let Err(e) = self.out.flush() {
            log::warn!("flush failed: {}", e);
        }
    }
}
