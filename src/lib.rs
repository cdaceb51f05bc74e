//! cozyterm - a tabbed portfolio terminal in Rust, compiled to WASM
//!
//! A fake shell in a fake window: visitors type commands to browse a small
//! read-only filesystem of pages, projects and links.
//!
//! Design principles:
//! - Pure core: the desktop turns events into render operations and never
//!   touches a screen
//! - Tractable: fixed command set, fixed content, one state machine per
//!   concern (tabs, window, theme, deferred tasks)
//! - Thin adapters: the browser and the CLI only translate events and draw
//!
//! Platform support:
//! - Browser (wasm32-unknown-unknown): DOM rendering, `localStorage` theme
//! - Native CLI: text rendering, JSON-file theme
//!
//! Module map:
//! - [`vfs`]: the read-only content tree and path resolution
//! - [`shell`]: commands, interpreter, sessions, line editing
//! - [`desktop`]: tabs, window, scheduler and the [`desktop::Desktop`] orchestrator
//! - [`theme`] and [`prefs`]: the persisted theme
//! - [`platform`]: renderers and the browser bindings

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod config;
pub mod desktop;
pub mod error;
pub mod input;
pub mod platform;
pub mod prefs;
pub mod shell;
pub mod theme;
pub mod vfs;

#[cfg(target_arch = "wasm32")]
pub mod logging;

pub use config::ShellConfig;
pub use desktop::{Desktop, RenderOp, UiEvent};
pub use error::{Error, Result};

/// Initialize panic hook for better error messages in browser console
#[cfg(target_arch = "wasm32")]
fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the desktop. This is the WASM entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    init_panic_hook();
    logging::init(log::LevelFilter::Info);
    platform::web::start()
}
