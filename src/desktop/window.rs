//! Window state machine
//!
//! The terminal window is either closed, shown normally, minimized to the
//! restore button, or maximized. Independently it is laid out either by
//! the page flow (centered by CSS) or at an explicit rectangle once the
//! user has dragged or resized it. Drag and resize are transient
//! interactions driven by pointer moves.

use super::geometry::{Point, Rect, Size};

/// Window visibility and size mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Closed,
    Normal,
    Minimized,
    Maximized,
}

impl WindowMode {
    pub fn is_open(&self) -> bool {
        *self != WindowMode::Closed
    }
}

/// Where the frame sits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Layout {
    /// Wherever the page puts it
    #[default]
    Flow,
    /// Explicit position and size in viewport pixels
    Positioned(Rect),
}

/// Edges grabbed by a resize handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ResizeEdges {
    /// Parse a handle direction such as `"n"`, `"se"` or `"w"`. Returns
    /// `None` if no edge is named.
    pub fn parse(direction: &str) -> Option<Self> {
        let edges = Self {
            north: direction.contains('n'),
            south: direction.contains('s'),
            east: direction.contains('e'),
            west: direction.contains('w'),
        };
        (edges != Self::default()).then_some(edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    Idle,
    /// Pointer offset from the frame's top-left
    Dragging { offset: Point },
    Resizing {
        edges: ResizeEdges,
        start: Point,
        origin: Rect,
    },
}

/// Window controller
#[derive(Debug, Clone)]
pub struct WindowController {
    mode: WindowMode,
    layout: Layout,
    interaction: Interaction,
    min_size: Size,
}

impl WindowController {
    pub fn new(min_size: Size) -> Self {
        Self {
            mode: WindowMode::Closed,
            layout: Layout::Flow,
            interaction: Interaction::Idle,
            min_size,
        }
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::Idle
    }

    // ========== Mode transitions ==========
    //
    // Each returns true if the mode changed.

    /// Show the window. From closed it comes back in the page flow; from
    /// minimized it is restored.
    pub fn open(&mut self) -> bool {
        match self.mode {
            WindowMode::Closed => {
                self.mode = WindowMode::Normal;
                self.layout = Layout::Flow;
                self.interaction = Interaction::Idle;
                log::debug!("window opened");
                true
            }
            WindowMode::Minimized => self.restore(),
            WindowMode::Normal | WindowMode::Maximized => false,
        }
    }

    pub fn minimize(&mut self) -> bool {
        match self.mode {
            WindowMode::Normal | WindowMode::Maximized => {
                self.mode = WindowMode::Minimized;
                self.interaction = Interaction::Idle;
                true
            }
            WindowMode::Closed | WindowMode::Minimized => false,
        }
    }

    pub fn toggle_maximize(&mut self) -> bool {
        self.mode = match self.mode {
            WindowMode::Normal => WindowMode::Maximized,
            WindowMode::Maximized => WindowMode::Normal,
            WindowMode::Closed | WindowMode::Minimized => return false,
        };
        self.interaction = Interaction::Idle;
        true
    }

    /// Back to normal from minimized or maximized
    pub fn restore(&mut self) -> bool {
        match self.mode {
            WindowMode::Minimized | WindowMode::Maximized => {
                self.mode = WindowMode::Normal;
                true
            }
            WindowMode::Closed | WindowMode::Normal => false,
        }
    }

    /// Escape key: restores only a minimized window
    pub fn escape(&mut self) -> bool {
        self.mode == WindowMode::Minimized && self.restore()
    }

    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.mode = WindowMode::Closed;
        self.interaction = Interaction::Idle;
        log::debug!("window closed");
        true
    }

    // ========== Drag and resize ==========

    fn can_move(&self) -> bool {
        self.mode == WindowMode::Normal
    }

    /// Current explicit rectangle, switching from flow layout to `frame`
    /// (the frame's measured on-screen rect) on first use
    fn pin(&mut self, frame: Rect) -> Rect {
        match self.layout {
            Layout::Positioned(rect) => rect,
            Layout::Flow => {
                self.layout = Layout::Positioned(frame);
                frame
            }
        }
    }

    /// Start dragging from the title bar. `frame` is the window's current
    /// on-screen rectangle.
    pub fn begin_drag(&mut self, pointer: Point, frame: Rect) -> bool {
        if !self.can_move() {
            return false;
        }
        let rect = self.pin(frame);
        self.interaction = Interaction::Dragging {
            offset: pointer.offset_from(&rect.top_left()),
        };
        true
    }

    /// Start resizing from a handle
    pub fn begin_resize(&mut self, edges: ResizeEdges, pointer: Point, frame: Rect) -> bool {
        if !self.can_move() {
            return false;
        }
        let origin = self.pin(frame);
        self.interaction = Interaction::Resizing {
            edges,
            start: pointer,
            origin,
        };
        true
    }

    /// Pointer moved. Returns the new frame rectangle if a drag or resize
    /// is in progress.
    pub fn pointer_move(&mut self, pointer: Point, viewport: Size) -> Option<Rect> {
        let Layout::Positioned(current) = self.layout else {
            return None;
        };

        let next = match self.interaction {
            Interaction::Idle => return None,
            Interaction::Dragging { offset } => current
                .moved_to(pointer.offset_from(&offset))
                .clamp_position(viewport),
            Interaction::Resizing {
                edges,
                start,
                origin,
            } => self.resized(edges, pointer.offset_from(&start), origin, viewport),
        };

        self.layout = Layout::Positioned(next);
        Some(next)
    }

    fn resized(&self, edges: ResizeEdges, delta: Point, origin: Rect, viewport: Size) -> Rect {
        let min = self.min_size;
        let mut rect = origin;

        if edges.east {
            rect.width = min.width.max(origin.width + delta.x);
        }
        if edges.west {
            let width = origin.width - delta.x;
            if width >= min.width {
                rect.width = width;
                rect.x = origin.x + delta.x;
            }
        }
        if edges.south {
            rect.height = min.height.max(origin.height + delta.y);
        }
        if edges.north {
            let height = origin.height - delta.y;
            if height >= min.height {
                rect.height = height;
                rect.y = origin.y + delta.y;
            }
        }

        // The viewport wins over the minimum size
        rect.x = rect.x.max(0.0);
        rect.y = rect.y.max(0.0);
        if rect.x + rect.width > viewport.width {
            rect.width = viewport.width - rect.x;
        }
        if rect.y + rect.height > viewport.height {
            rect.height = viewport.height - rect.y;
        }
        rect
    }

    /// Pointer released. True if an interaction ended.
    pub fn end_interaction(&mut self) -> bool {
        let was = self.is_interacting();
        self.interaction = Interaction::Idle;
        was
    }
}

impl Default for WindowController {
    fn default() -> Self {
        Self::new(Size::new(320.0, 200.0))
    }
}
