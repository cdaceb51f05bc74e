//! Platform Abstraction Layer
//!
//! The desktop core never touches a screen. It hands out
//! [`RenderOp`](crate::desktop::RenderOp)s and each platform draws them:
//!
//! - Browser (wasm32): DOM manipulation via web-sys, see [`web`]
//! - Native CLI: plain text on a `Write`, see [`text`]
//!
//! Only the [`Renderer`] implementation knows about the host environment.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub mod text;

use crate::desktop::RenderOp;

/// Something that can draw render operations
///
/// Rendering failures are the renderer's problem: a DOM node that went
/// missing or a closed stdout is logged, never reported back to the core.
pub trait Renderer {
    /// Apply a single operation
    fn render(&mut self, op: &RenderOp);

    /// Apply a batch of operations in order
    fn render_all(&mut self, ops: &[RenderOp]) {
        for op in ops {
            self.render(op);
        }
    }
}
