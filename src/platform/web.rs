//! Browser Platform Implementation
//!
//! Binds the desktop to the page:
//! - DOM events become [`UiEvent`]s and [`KeyInput`]s
//! - [`RenderOp`]s become DOM edits (see [`DomRenderer`])
//! - Deferred tasks run from a single re-armed `setTimeout`
//! - The theme lives in `localStorage`
//!
//! The desktop sits in a thread-local. Every handler borrows it only long
//! enough to collect ops and renders after the borrow ends, so a render
//! that triggers another event (setting `location.hash`) can't re-enter.
//!
//! Expected page structure (see `index.html`):
//! `#window-frame` holding `#title-bar` (with `#window-title` and the
//! `#close-btn`/`#minimize-btn`/`#maximize-btn` buttons), `.tab-bar` with a
//! `.tab-add` button, `#terminal-body`, and `.resize-handle[data-resize]`
//! edges; outside it `#desktop-icons` with `#icon-terminal`, and
//! `#restore-btn`.

use super::Renderer;
use crate::config::ShellConfig;
use crate::desktop::{
    Desktop, Layout, Point, Rect, RenderOp, ResizeEdges, SessionId, Size, UiEvent, WindowMode,
};
use crate::input::{KeyInput, Modifiers};
use crate::prefs::LocalStorage;
use crate::shell::{markup, LinkTarget};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

thread_local! {
    static DESKTOP: RefCell<Option<Desktop>> = const { RefCell::new(None) };
    static TICK_CALLBACK: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
    static TICK_HANDLE: Cell<Option<i32>> = const { Cell::new(None) };
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Monotonic milliseconds; wall clock where `performance` is missing
fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Install the desktop into the page and boot it
pub fn start() -> Result<(), JsValue> {
    let desktop = Desktop::new(ShellConfig::default(), Box::new(LocalStorage::open()));
    DESKTOP.with(|d| *d.borrow_mut() = Some(desktop));

    install_tick()?;
    attach_listeners()?;

    // Read before booting: rendering the first activation rewrites the hash
    let hash = window()?.location().hash()?;
    dispatch(move |desktop, now| desktop.boot_at(&hash, now));

    log::info!("cozyterm started");
    Ok(())
}

/// Run `f` against the desktop, then render what it produced and re-arm
/// the timer
fn dispatch(f: impl FnOnce(&mut Desktop, f64) -> Vec<RenderOp>) {
    let result = DESKTOP.with(|d| {
        d.borrow_mut().as_mut().map(|desktop| {
            let ops = f(desktop, now());
            (ops, desktop.config().prompt.clone())
        })
    });
    let Some((ops, prompt)) = result else {
        log::warn!("event before desktop was installed");
        return;
    };
    match DomRenderer::new(prompt) {
        Ok(mut renderer) => renderer.render_all(&ops),
        Err(e) => log::error!("no document to render into: {:?}", e),
    }
    arm_tick();
}

// ========== Timer ==========

fn install_tick() -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(|| {
        TICK_HANDLE.with(|h| h.set(None));
        dispatch(|desktop, now| desktop.tick(now));
    }) as Box<dyn FnMut()>);
    TICK_CALLBACK.with(|c| *c.borrow_mut() = Some(callback));
    Ok(())
}

/// Point the single timeout at the next deadline
fn arm_tick() {
    let Ok(window) = window() else { return };

    if let Some(handle) = TICK_HANDLE.with(|h| h.take()) {
        window.clear_timeout_with_handle(handle);
    }

    let delay = DESKTOP.with(|d| {
        d.borrow()
            .as_ref()
            .and_then(|desktop| desktop.next_deadline(now()))
    });
    let Some(delay) = delay else { return };

    TICK_CALLBACK.with(|c| {
        let callback = c.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay.ceil() as i32,
        ) {
            Ok(handle) => TICK_HANDLE.with(|h| h.set(Some(handle))),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    });
}

// ========== Input ==========

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Listen on the element with `id`, if the page has it
fn listen_id(
    document: &Document,
    id: &str,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    match document.get_element_by_id(id) {
        Some(element) => listen(&element, kind, handler),
        None => {
            log::warn!("page has no #{}", id);
            Ok(())
        }
    }
}

fn on_click(document: &Document, id: &str, event: UiEvent) -> Result<(), JsValue> {
    listen_id(document, id, "click", move |_| {
        let event = event.clone();
        dispatch(move |desktop, now| desktop.handle(event, now));
    })
}

/// Closest ancestor of the event target matching `selector`
fn target_closest(event: &Event, selector: &str) -> Option<Element> {
    let element: Element = event.target()?.dyn_into().ok()?;
    element.closest(selector).ok().flatten()
}

fn pointer(event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64))
}

fn viewport() -> Size {
    let Ok(window) = window() else {
        return Size::default();
    };
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// The window frame's current on-screen rectangle
fn frame_rect(document: &Document) -> Rect {
    match document.get_element_by_id("window-frame") {
        Some(frame) => {
            let r = frame.get_bounding_client_rect();
            Rect::new(r.left(), r.top(), r.width(), r.height())
        }
        None => Rect::default(),
    }
}

fn key_input(event: &KeyboardEvent) -> KeyInput {
    KeyInput {
        key: event.key(),
        modifiers: Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
    }
}

fn attach_listeners() -> Result<(), JsValue> {
    let win = window()?;
    let document = document()?;

    listen(&document, "keydown", |event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = key_input(keyboard);
        let mut consumed = false;
        dispatch(|desktop, now| match desktop.handle_key(&key, now) {
            Some(ops) => {
                consumed = true;
                ops
            }
            None => Vec::new(),
        });
        if consumed {
            event.prevent_default();
        }
    })?;

    // Tab bar: close buttons sit inside tabs, so check them first
    if let Some(bar) = document.query_selector(".tab-bar")? {
        listen(&bar, "click", |event| {
            let ui = if let Some(close) = target_closest(&event, "[data-close]") {
                close
                    .get_attribute("data-close")
                    .map(|id| UiEvent::TabCloseClicked(SessionId::new(id)))
            } else if target_closest(&event, ".tab-add").is_some() {
                Some(UiEvent::NewTabClicked)
            } else {
                target_closest(&event, ".tab[data-session]")
                    .and_then(|tab| tab.get_attribute("data-session"))
                    .map(|id| UiEvent::TabClicked(SessionId::new(id)))
            };
            if let Some(ui) = ui {
                event.stop_propagation();
                dispatch(move |desktop, now| desktop.handle(ui, now));
            }
        })?;
    }

    on_click(&document, "close-btn", UiEvent::CloseButton)?;
    on_click(&document, "minimize-btn", UiEvent::MinimizeButton)?;
    on_click(&document, "maximize-btn", UiEvent::MaximizeButton)?;
    on_click(&document, "restore-btn", UiEvent::RestoreButton)?;

    listen_id(&document, "title-bar", "dblclick", |event| {
        if target_closest(&event, "button").is_none() {
            dispatch(|desktop, now| desktop.handle(UiEvent::TitleBarDoubleClick, now));
        }
    })?;

    let doc = document.clone();
    listen_id(&document, "title-bar", "mousedown", move |event| {
        if target_closest(&event, "button").is_some() {
            return;
        }
        let Some(pointer) = pointer(&event) else { return };
        let frame = frame_rect(&doc);
        dispatch(|desktop, now| desktop.handle(UiEvent::DragStart { pointer, frame }, now));
    })?;

    let doc = document.clone();
    listen(&document, "mousedown", move |event| {
        let Some(handle) = target_closest(&event, ".resize-handle[data-resize]") else {
            return;
        };
        let edges = handle
            .get_attribute("data-resize")
            .and_then(|d| ResizeEdges::parse(&d));
        let (Some(edges), Some(pointer)) = (edges, pointer(&event)) else {
            return;
        };
        event.prevent_default();
        let frame = frame_rect(&doc);
        dispatch(|desktop, now| {
            desktop.handle(
                UiEvent::ResizeStart {
                    edges,
                    pointer,
                    frame,
                },
                now,
            )
        });
    })?;

    listen(&document, "mousemove", |event| {
        let Some(pointer) = pointer(&event) else { return };
        let viewport = viewport();
        let interacting = DESKTOP.with(|d| {
            d.borrow()
                .as_ref()
                .is_some_and(|desktop| desktop.window().is_interacting())
        });
        if interacting {
            dispatch(|desktop, now| desktop.handle(UiEvent::PointerMove { pointer, viewport }, now));
        }
    })?;

    listen(&document, "mouseup", |_| {
        dispatch(|desktop, now| desktop.handle(UiEvent::PointerUp, now));
    })?;

    listen_id(&document, "icon-terminal", "dblclick", |_| {
        dispatch(|desktop, now| desktop.handle(UiEvent::DesktopIconOpened, now));
    })?;

    listen(&win, "hashchange", |_| {
        let Ok(hash) = window().and_then(|w| w.location().hash()) else {
            return;
        };
        dispatch(move |desktop, now| desktop.handle(UiEvent::FragmentChanged(hash), now));
    })?;

    Ok(())
}

// ========== Rendering ==========

/// Applies render ops to the live document
pub struct DomRenderer {
    document: Document,
    /// Drawn in front of new input lines
    prompt: String,
}

impl DomRenderer {
    pub fn new(prompt: impl Into<String>) -> Result<Self, JsValue> {
        Ok(Self {
            document: document()?,
            prompt: prompt.into(),
        })
    }

    fn by_id(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
    }

    fn select(&self, selector: &str) -> Result<Element, JsValue> {
        self.document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("missing {}", selector)))
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(class);
        Ok(element)
    }

    fn section_id(id: &str) -> String {
        format!("tab-{}", id)
    }

    fn transcript(&self, id: &str) -> Result<Element, JsValue> {
        self.select(&format!("#{} .transcript", Self::section_id(id)))
    }

    /// Append a block to a transcript and keep it scrolled to the bottom
    fn append(&self, id: &str, block: &Element) -> Result<(), JsValue> {
        self.transcript(id)?.append_child(block)?;
        let section = self.by_id(&Self::section_id(id))?;
        section.set_scroll_top(section.scroll_height());
        Ok(())
    }

    fn show(&self, id: &str, visible: bool) -> Result<(), JsValue> {
        if let Ok(element) = self.by_id(id)
            && let Some(element) = element.dyn_ref::<HtmlElement>()
        {
            element
                .style()
                .set_property("display", if visible { "" } else { "none" })?;
        }
        Ok(())
    }

    fn open_tab(&self, id: &str, label: &str) -> Result<(), JsValue> {
        let tab = self.element("div", "tab")?;
        tab.set_attribute("data-session", id)?;
        let text = self.element("span", "tab-label")?;
        text.set_text_content(Some(label));
        let close = self.element("span", "tab-close")?;
        close.set_attribute("data-close", id)?;
        close.set_text_content(Some("×"));
        tab.append_child(&text)?;
        tab.append_child(&close)?;

        let bar = self.select(".tab-bar")?;
        let add = bar.query_selector(".tab-add")?;
        bar.insert_before(&tab, add.as_deref())?;

        let section = self.element("div", "terminal")?;
        section.set_id(&Self::section_id(id));
        section.set_attribute("tabindex", "0")?;
        let transcript = self.element("div", "transcript")?;
        let line = self.element("div", "input-line")?;
        line.set_inner_html(&format!(
            "<span class=\"prompt\">{}</span> <span class=\"input\"></span>",
            markup::escape(&self.prompt)
        ));
        section.append_child(&transcript)?;
        section.append_child(&line)?;
        self.by_id("terminal-body")?.append_child(&section)?;
        Ok(())
    }

    fn close_tab(&self, id: &str) -> Result<(), JsValue> {
        if let Some(tab) = self
            .document
            .query_selector(&format!(".tab[data-session=\"{}\"]", id))?
        {
            tab.remove();
        }
        if let Some(section) = self.document.get_element_by_id(&Self::section_id(id)) {
            section.remove();
        }
        Ok(())
    }

    fn activate(&self, id: &str, title: &str, document_title: &str) -> Result<(), JsValue> {
        let tabs = self.document.query_selector_all(".tab[data-session]")?;
        for i in 0..tabs.length() {
            if let Some(tab) = tabs.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let active = tab.get_attribute("data-session").as_deref() == Some(id);
                tab.class_list().toggle_with_force("active", active)?;
            }
        }
        let sections = self.document.query_selector_all("#terminal-body .terminal")?;
        for i in 0..sections.length() {
            if let Some(section) = sections.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let active = section.id() == Self::section_id(id);
                section.class_list().toggle_with_force("active", active)?;
            }
        }

        self.by_id("window-title")?.set_text_content(Some(title));
        self.document.set_title(document_title);
        window()?.location().set_hash(id)?;
        Ok(())
    }

    fn draw_input(&self, id: &str, text: &str, caret: usize) -> Result<(), JsValue> {
        let (before, after) = text.split_at(caret.min(text.len()));
        let mut rest = after.chars();
        let under = rest.next().map(String::from).unwrap_or_else(|| " ".into());
        let html = format!(
            "{}<span class=\"caret\">{}</span>{}",
            markup::escape(before),
            markup::escape(&under),
            markup::escape(rest.as_str())
        );
        self.select(&format!("#{} .input-line .input", Self::section_id(id)))?
            .set_inner_html(&html);
        Ok(())
    }

    fn set_window_mode(&self, mode: WindowMode) -> Result<(), JsValue> {
        let frame = self.by_id("window-frame")?;
        let classes = frame.class_list();
        classes.toggle_with_force("closed", mode == WindowMode::Closed)?;
        classes.toggle_with_force("minimized", mode == WindowMode::Minimized)?;
        classes.toggle_with_force("maximized", mode == WindowMode::Maximized)?;
        self.show("restore-btn", mode == WindowMode::Minimized)
    }

    fn set_layout(&self, layout: Layout) -> Result<(), JsValue> {
        let frame = self.by_id("window-frame")?;
        let Some(frame) = frame.dyn_ref::<HtmlElement>() else {
            return Ok(());
        };
        let style = frame.style();
        match layout {
            Layout::Flow => {
                for property in ["position", "left", "top", "width", "height", "margin"] {
                    style.remove_property(property)?;
                }
            }
            Layout::Positioned(rect) => {
                style.set_property("position", "fixed")?;
                style.set_property("margin", "0")?;
                style.set_property("left", &format!("{}px", rect.x))?;
                style.set_property("top", &format!("{}px", rect.y))?;
                style.set_property("width", &format!("{}px", rect.width))?;
                style.set_property("height", &format!("{}px", rect.height))?;
            }
        }
        Ok(())
    }

    fn set_theme(&self, theme: crate::theme::Theme) -> Result<(), JsValue> {
        let Some(root) = self.document.document_element() else {
            return Ok(());
        };
        let classes = root.class_list();
        for other in crate::theme::Theme::ALL {
            if let Some(class) = other.css_class() {
                classes.toggle_with_force(class, other == theme)?;
            }
        }
        Ok(())
    }

    fn apply(&self, op: &RenderOp) -> Result<(), JsValue> {
        match op {
            RenderOp::TabOpened { id, label } => self.open_tab(id.as_str(), label)?,
            RenderOp::TabClosed { id } => self.close_tab(id.as_str())?,
            RenderOp::TabActivated {
                id,
                title,
                document_title,
            } => self.activate(id.as_str(), title, document_title)?,
            RenderOp::Banner { id, art } => {
                let pre = self.element("pre", "ascii-art")?;
                pre.set_text_content(Some(*art));
                self.append(id.as_str(), &pre)?;
            }
            RenderOp::CommandEcho { id, prompt, line } => {
                let block = self.element("div", "line")?;
                block.set_inner_html(&format!(
                    "<span class=\"prompt\">{}</span> {}",
                    markup::escape(prompt),
                    markup::escape(line)
                ));
                self.append(id.as_str(), &block)?;
            }
            RenderOp::Output { id, markup } => {
                let block = self.element("div", "output")?;
                block.set_inner_html(markup);
                self.append(id.as_str(), &block)?;
            }
            RenderOp::ClearTranscript { id } => self.transcript(id.as_str())?.set_inner_html(""),
            RenderOp::Input { id, text, caret } => self.draw_input(id.as_str(), text, *caret)?,
            RenderOp::Window(mode) => self.set_window_mode(*mode)?,
            RenderOp::Layout(layout) => self.set_layout(*layout)?,
            RenderOp::DesktopVisible(visible) => self.show("desktop-icons", *visible)?,
            RenderOp::Theme(theme) => self.set_theme(*theme)?,
            RenderOp::OpenUrl { url, target } => {
                let target = match target {
                    LinkTarget::NewTab => "_blank",
                    LinkTarget::SameWindow => "_self",
                };
                window()?.open_with_url_and_target(url, target)?;
            }
            RenderOp::Focus { id } => {
                if let Ok(section) = self.by_id(&Self::section_id(id.as_str()))
                    && let Some(section) = section.dyn_ref::<HtmlElement>()
                {
                    section.focus()?;
                }
            }
            RenderOp::Flourish(on) => {
                if let Some(body) = self.document.body() {
                    body.class_list().toggle_with_force("party", *on)?;
                }
            }
        }
        Ok(())
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, op: &RenderOp) {
        if let Err(e) = self.apply(op) {
            log::warn!("render {:?} failed: {:?}", op, e);
        }
    }
}
