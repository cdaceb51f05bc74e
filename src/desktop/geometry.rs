//! Geometry types for the desktop
//!
//! Provides basic 2D geometry primitives in CSS pixels.

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Vector from `other` to this point
    pub fn offset_from(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width and height
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle with position and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the top-left corner
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, moved so the top-left is at `origin`
    pub fn moved_to(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// Move (without resizing) so the rectangle lies inside a viewport of
    /// `bounds`. A rectangle larger than the viewport is pinned to 0.
    pub fn clamp_position(&self, bounds: Size) -> Rect {
        let max_x = (bounds.width - self.width).max(0.0);
        let max_y = (bounds.height - self.height).max(0.0);
        Rect::new(
            self.x.min(max_x).max(0.0),
            self.y.min(max_y).max(0.0),
            self.width,
            self.height,
        )
    }
}
