//! Raster rendering context
//!
//! Owns the backing pixel buffer of a mounted surface. All drawing calls take
//! display-space coordinates; the device pixel ratio is applied once through
//! the context transform, the same way a browser 2D context is scaled after
//! its backing store is enlarged.

use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};
use tracing::debug;

use crate::error::{Result, SurfaceError};
use crate::geometry::{DisplaySize, PixelRect, Point};
use crate::style::StrokeStyle;

/// Backing store plus the drawing state applied to it.
pub struct RenderContext {
    pixmap: Pixmap,
    display: DisplaySize,
    pixel_ratio: f32,
    transform: Transform,
    paint: Paint<'static>,
    stroke: Stroke,
    /// End of the current path; `None` when no path is open.
    cursor: Option<Point>,
    /// Physical pixels touched since the last [`RenderContext::take_dirty`].
    dirty: Option<PixelRect>,
}

impl RenderContext {
    /// Allocate a backing store of `display × pixel_ratio` physical pixels.
    pub fn new(width: f32, height: f32, pixel_ratio: f32, style: &StrokeStyle) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
            return Err(SurfaceError::InvalidDisplaySize { width, height });
        }
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(SurfaceError::InvalidPixelRatio(pixel_ratio));
        }

        let display = DisplaySize {
            width: width.round() as u32,
            height: height.round() as u32,
        };
        let backing_width = (display.width as f32 * pixel_ratio).round().max(1.0) as u32;
        let backing_height = (display.height as f32 * pixel_ratio).round().max(1.0) as u32;

        let pixmap = Pixmap::new(backing_width, backing_height).ok_or(SurfaceError::Allocation {
            width: backing_width,
            height: backing_height,
        })?;

        let DisplaySize {
            width: display_width,
            height: display_height,
        } = display;
        debug!(
            display_width,
            display_height,
            backing_width,
            backing_height,
            pixel_ratio,
            "Allocated backing store"
        );

        let mut paint = Paint::default();
        paint.anti_alias = true;

        let mut context = Self {
            pixmap,
            display,
            pixel_ratio,
            transform: Transform::from_scale(pixel_ratio, pixel_ratio),
            paint,
            stroke: Stroke {
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            },
            cursor: None,
            dirty: None,
        };
        context.apply_style(style);
        Ok(context)
    }

    /// Set the color and width used by subsequent strokes.
    pub fn apply_style(&mut self, style: &StrokeStyle) {
        let c = style.color;
        self.paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        if StrokeStyle::is_valid_width(style.width) {
            self.stroke.width = style.width;
        }
    }

    /// Start a new path at `at`, discarding any open one.
    pub fn begin_path(&mut self, at: Point) {
        self.cursor = Some(at);
    }

    /// Extend the open path to `to` and rasterize the new segment.
    ///
    /// Returns `false` when no path is open.
    pub fn line_to(&mut self, to: Point) -> bool {
        let Some(from) = self.cursor else {
            return false;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, &self.paint, &self.stroke, self.transform, None);
            self.mark_segment(from, to);
        }

        self.cursor = Some(to);
        true
    }

    /// Grow the dirty region by the segment's stroked bounds.
    fn mark_segment(&mut self, from: Point, to: Point) {
        // half the width plus a pixel of anti-aliasing fringe
        let pad = self.stroke.width / 2.0 + 1.0;
        let r = self.pixel_ratio;
        let min = Point::new((from.x.min(to.x) - pad) * r, (from.y.min(to.y) - pad) * r);
        let max = Point::new((from.x.max(to.x) + pad) * r, (from.y.max(to.y) + pad) * r);
        if let Some(rect) =
            PixelRect::from_bounds(min, max, self.pixmap.width(), self.pixmap.height())
        {
            self.mark_dirty(rect);
        }
    }

    fn mark_dirty(&mut self, rect: PixelRect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    /// Region changed since the previous call, then reset.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Close the open path, if any.
    pub fn close_path(&mut self) {
        self.cursor = None;
    }

    /// Erase every backing pixel.
    ///
    /// Clears the physical buffer directly so the whole display area is
    /// covered regardless of the DPR transform.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        let full = PixelRect::new(0, 0, self.pixmap.width(), self.pixmap.height());
        self.mark_dirty(full);
    }

    /// Backing store
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Size in display units
    #[must_use]
    pub fn display_size(&self) -> DisplaySize {
        self.display
    }

    /// Device pixel ratio fixed at allocation
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Current stroke width in display units
    #[must_use]
    pub fn line_width(&self) -> f32 {
        self.stroke.width
    }

    /// Whether a path is open
    #[must_use]
    pub fn has_open_path(&self) -> bool {
        self.cursor.is_some()
    }
}
