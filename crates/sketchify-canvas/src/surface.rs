//! Drawing surface
//!
//! A freehand raster surface. Strokes are baked into the backing pixel buffer
//! as they arrive; nothing about the path survives a pointer release.
//!
//! A surface starts unattached. Until [`DrawingSurface::mount`] succeeds there
//! is no rendering context and every operation is a silent no-op.

use tracing::{debug, warn};

use crate::context::RenderContext;
use crate::error::Result;
use crate::export::{export_dimensions, ExportSnapshot};
use crate::geometry::{DisplaySize, PixelRect, ViewportRect};
use tiny_skia::Pixmap;
use crate::input::{EventResponse, Gesture, InputEvent};
use crate::style::{Rgba, StrokeStyle};

/// The narrow interface a surface's owner works with.
pub trait SketchCapture {
    /// Erase all ink.
    fn clear(&mut self);

    /// Encoded PNG data URL of the current ink, or `None` when there is
    /// nothing to export.
    fn export_snapshot(&self) -> Option<String>;
}

/// Straight RGBA bytes of a rectangle of the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    /// Where the bytes belong, in physical pixels
    pub rect: PixelRect,
    /// Row-major RGBA, `rect.width * rect.height * 4` bytes
    pub rgba: Vec<u8>,
}

fn copy_region(pixmap: &Pixmap, rect: PixelRect) -> Vec<u8> {
    let stride = pixmap.width() as usize;
    let pixels = pixmap.pixels();
    let mut out = Vec::with_capacity(rect.width as usize * rect.height as usize * 4);
    for row in rect.y..rect.y + rect.height {
        let start = row as usize * stride + rect.x as usize;
        for p in &pixels[start..start + rect.width as usize] {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
    }
    out
}

/// Freehand raster drawing surface.
#[derive(Default)]
pub struct DrawingSurface {
    context: Option<RenderContext>,
    style: StrokeStyle,
    drawing: bool,
    has_ink: bool,
}

impl DrawingSurface {
    /// Create an unattached surface with the default style
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unattached surface with a given style
    #[must_use]
    pub fn with_style(style: StrokeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Attach a backing store sized `display × pixel_ratio`.
    ///
    /// The pixel ratio is fixed by the first successful mount; later calls
    /// leave the existing buffer untouched.
    pub fn mount(&mut self, width: f32, height: f32, pixel_ratio: f32) -> Result<()> {
        if self.context.is_some() {
            debug!("Surface already mounted, keeping existing backing store");
            return Ok(());
        }
        self.context = Some(RenderContext::new(width, height, pixel_ratio, &self.style)?);
        Ok(())
    }

    /// Whether a rendering context is attached
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    /// Active stroke style
    #[must_use]
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Replace the stroke style; ink already drawn is unaffected.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style.color = style.color;
        if StrokeStyle::is_valid_width(style.width) {
            self.style.width = style.width;
        } else {
            debug!(width = style.width, "Ignoring invalid stroke width");
        }
        match self.context.as_mut() {
            Some(ctx) => ctx.apply_style(&self.style),
            None => debug!("No rendering context, style kept for mount"),
        }
    }

    /// Change only the ink color
    pub fn set_color(&mut self, color: Rgba) {
        self.set_style(StrokeStyle::new(color, self.style.width));
    }

    /// Change only the line width
    pub fn set_line_width(&mut self, width: f32) {
        self.set_style(StrokeStyle::new(self.style.color, width));
    }

    /// Feed one host event. `bounds` is the element's current bounding box.
    pub fn handle_input(&mut self, event: &InputEvent, bounds: &ViewportRect) -> EventResponse {
        let Some(ctx) = self.context.as_mut() else {
            debug!("No rendering context, input ignored");
            return EventResponse::IGNORED;
        };
        let Some(gesture) = event.gesture() else {
            return EventResponse::IGNORED;
        };

        match gesture {
            Gesture::Press(client) => {
                ctx.begin_path(bounds.to_local(client));
                self.drawing = true;
                EventResponse::CONSUMED
            }
            Gesture::Drag(client) => {
                if !self.drawing {
                    return EventResponse::IGNORED;
                }
                ctx.line_to(bounds.to_local(client));
                self.has_ink = true;
                EventResponse::CONSUMED
            }
            Gesture::Release => {
                ctx.close_path();
                self.drawing = false;
                EventResponse::IGNORED
            }
        }
    }

    /// Whether a stroke is in progress
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Whether any ink has been drawn since mount or the last clear
    #[must_use]
    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    /// Size in display units, when mounted
    #[must_use]
    pub fn display_size(&self) -> Option<DisplaySize> {
        self.context.as_ref().map(RenderContext::display_size)
    }

    /// Encode the current ink.
    ///
    /// `Ok(None)` means nothing to export: no ink, or no rendering context.
    pub fn snapshot(&self) -> Result<Option<ExportSnapshot>> {
        if !self.has_ink {
            return Ok(None);
        }
        let Some(ctx) = self.context.as_ref() else {
            debug!("No rendering context, nothing to export");
            return Ok(None);
        };

        let target = export_dimensions(ctx.display_size());
        let snapshot = ExportSnapshot::render(ctx.pixmap(), target)?;
        debug!(
            width = snapshot.width(),
            height = snapshot.height(),
            bytes = snapshot.png_bytes().len(),
            "Exported snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Backing store as straight RGBA bytes with its physical size, for
    /// hosts that blit the raster onto a display.
    #[must_use]
    pub fn rgba_pixels(&self) -> Option<(u32, u32, Vec<u8>)> {
        let pixmap = self.context.as_ref()?.pixmap();
        let full = PixelRect::new(0, 0, pixmap.width(), pixmap.height());
        Some((pixmap.width(), pixmap.height(), copy_region(pixmap, full)))
    }

    /// Pixels changed since the previous call (strokes and clears), so a
    /// host can repaint only that part of its display.
    pub fn take_dirty_region(&mut self) -> Option<PixelRegion> {
        let ctx = self.context.as_mut()?;
        let rect = ctx.take_dirty()?;
        Some(PixelRegion {
            rect,
            rgba: copy_region(ctx.pixmap(), rect),
        })
    }
}

impl SketchCapture for DrawingSurface {
    fn clear(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.clear();
        } else {
            debug!("No rendering context, clear ignored");
        }
        self.has_ink = false;
    }

    fn export_snapshot(&self) -> Option<String> {
        match self.snapshot() {
            Ok(snapshot) => snapshot.map(|s| s.to_data_url()),
            Err(e) => {
                warn!(error = %e, code = e.code(), "Snapshot export failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
