//! Coordinate types shared by input handling and rendering.

/// A point in either viewport (client) or canvas-local display space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the canvas element in viewport coordinates.
///
/// Mirrors what `getBoundingClientRect()` reports for the element; only the
/// top-left offset takes part in coordinate translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    /// Distance from the viewport's left edge
    pub left: f32,
    /// Distance from the viewport's top edge
    pub top: f32,
    /// Displayed width
    pub width: f32,
    /// Displayed height
    pub height: f32,
}

impl ViewportRect {
    /// Create a new rect
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a viewport point into canvas-local display coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

/// Integer size in display (CSS) units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    /// Width in display units
    pub width: u32,
    /// Height in display units
    pub height: u32,
}

/// Axis-aligned rectangle in physical (backing store) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Create a new rect
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `[min, max]` in float pixel space, clipped to a
    /// `bound_width × bound_height` buffer. `None` when nothing is left.
    #[must_use]
    pub fn from_bounds(
        min: Point,
        max: Point,
        bound_width: u32,
        bound_height: u32,
    ) -> Option<Self> {
        let clip = |v: f32, bound: u32| v.clamp(0.0, bound as f32);
        let left = clip(min.x.floor(), bound_width) as u32;
        let top = clip(min.y.floor(), bound_height) as u32;
        let right = clip(max.x.ceil(), bound_width) as u32;
        let bottom = clip(max.y.ceil(), bound_height) as u32;
        (right > left && bottom > top).then(|| Self::new(left, top, right - left, bottom - top))
    }

    /// Smallest rect containing both
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Self::new(left, top, right - left, bottom - top)
    }
}
