//! Pointer and touch input
//!
//! Host events are normalised into [`InputEvent`] before reaching the surface.
//! Coordinates are viewport (client) coordinates; the surface translates them
//! with the element's bounding box.

use crate::geometry::Point;

/// A host input event, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed
    MouseDown(Point),
    /// Mouse moved
    MouseMove(Point),
    /// Mouse button released
    MouseUp,
    /// Pointer left the surface
    MouseLeave,
    /// Touch began; all active touch points
    TouchStart(Vec<Point>),
    /// Touch moved; all active touch points
    TouchMove(Vec<Point>),
    /// Touch lifted
    TouchEnd,
    /// Touch interrupted by the host
    TouchCancel,
}

/// What the stroke state machine sees once device differences are removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Gesture {
    Press(Point),
    Drag(Point),
    Release,
}

impl InputEvent {
    /// Reduce to a gesture. Only the first touch point is honoured; a touch
    /// event without points yields nothing.
    pub(crate) fn gesture(&self) -> Option<Gesture> {
        match self {
            Self::MouseDown(p) => Some(Gesture::Press(*p)),
            Self::MouseMove(p) => Some(Gesture::Drag(*p)),
            Self::TouchStart(points) => points.first().copied().map(Gesture::Press),
            Self::TouchMove(points) => points.first().copied().map(Gesture::Drag),
            Self::MouseUp | Self::MouseLeave | Self::TouchEnd | Self::TouchCancel => {
                Some(Gesture::Release)
            }
        }
    }
}

/// Outcome the host applies to the originating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Host should suppress its default handling (scrolling, text selection)
    pub prevent_default: bool,
}

impl EventResponse {
    pub(crate) const CONSUMED: Self = Self {
        prevent_default: true,
    };
    pub(crate) const IGNORED: Self = Self {
        prevent_default: false,
    };
}
