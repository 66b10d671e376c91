//! Snapshot export
//!
//! Produces a size-capped, opaque PNG of a surface's raster content and wraps
//! it as a `data:` URL.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::error::{Result, SurfaceError};
use crate::geometry::DisplaySize;

/// Largest exported dimension, in display units
pub const MAX_EXPORT_DIMENSION: u32 = 1024;

/// Header of every exported data URL
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Target size for an export of `size`.
///
/// Sizes within the bound are kept exactly. Otherwise the larger side becomes
/// [`MAX_EXPORT_DIMENSION`] and the smaller is scaled by the same ratio and
/// rounded to the nearest integer (never below 1).
#[must_use]
pub fn export_dimensions(size: DisplaySize) -> DisplaySize {
    let DisplaySize { width, height } = size;
    if width <= MAX_EXPORT_DIMENSION && height <= MAX_EXPORT_DIMENSION {
        return size;
    }

    let max = f64::from(MAX_EXPORT_DIMENSION);
    let scaled = |side: u32, longest: u32| {
        ((f64::from(side) * max / f64::from(longest)).round() as u32).max(1)
    };

    if width >= height {
        DisplaySize {
            width: MAX_EXPORT_DIMENSION,
            height: scaled(height, width),
        }
    } else {
        DisplaySize {
            width: scaled(width, height),
            height: MAX_EXPORT_DIMENSION,
        }
    }
}

/// An encoded, immutable export of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl ExportSnapshot {
    /// Render `source` onto an opaque black buffer of `target` size and encode it.
    pub fn render(source: &Pixmap, target: DisplaySize) -> Result<Self> {
        let mut out = Pixmap::new(target.width, target.height).ok_or(SurfaceError::Allocation {
            width: target.width,
            height: target.height,
        })?;
        out.fill(Color::BLACK);

        let sx = target.width as f32 / source.width() as f32;
        let sy = target.height as f32 / source.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        out.draw_pixmap(0, 0, source.as_ref(), &paint, Transform::from_scale(sx, sy), None);

        let png = out
            .encode_png()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;

        Ok(Self {
            width: target.width,
            height: target.height,
            png,
        })
    }

    /// Width in pixels
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG bytes
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,<payload>`
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + self.png.len() * 4 / 3 + 4);
        url.push_str(PNG_DATA_URL_PREFIX);
        STANDARD.encode_string(&self.png, &mut url);
        url
    }
}

/// Drop the `data:<mime>;base64,` header, leaving the raw payload.
///
/// Strings without a header are returned unchanged.
#[must_use]
pub fn strip_data_url_header(data_url: &str) -> &str {
    if !data_url.starts_with("data:") {
        return data_url;
    }
    match data_url.split_once(',') {
        Some((_, payload)) => payload,
        None => data_url,
    }
}
