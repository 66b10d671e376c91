//! Sketchify Canvas - Freehand Drawing Surface
//!
//! This crate provides the drawing side of Sketchify:
//! - Surface: raster capture of mouse and touch strokes
//! - Context: DPR-scaled backing store and stroke rasterization
//! - Export: size-capped, opaque PNG snapshots as data URLs
//! - Flow: the client generate flow (export, relay call, UI state)
//! - Protocol: request/response types of the generation relay
//!
//! ## Usage
//!
//! ```
//! use sketchify_canvas::{DrawingSurface, InputEvent, Point, SketchCapture, ViewportRect};
//!
//! let mut surface = DrawingSurface::new();
//! surface.mount(800.0, 600.0, 2.0).unwrap();
//!
//! let bounds = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
//! surface.handle_input(&InputEvent::MouseDown(Point::new(10.0, 10.0)), &bounds);
//! surface.handle_input(&InputEvent::MouseMove(Point::new(200.0, 150.0)), &bounds);
//! surface.handle_input(&InputEvent::MouseUp, &bounds);
//!
//! let png = surface.export_snapshot().unwrap();
//! assert!(png.starts_with("data:image/png;base64,"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod export;
pub mod flow;
pub mod geometry;
pub mod input;
pub mod protocol;
pub mod style;
pub mod surface;

pub use context::RenderContext;
pub use error::{Result, SurfaceError};
pub use export::{
    export_dimensions, strip_data_url_header, ExportSnapshot, MAX_EXPORT_DIMENSION,
    PNG_DATA_URL_PREFIX,
};
pub use flow::{
    GenerateFlow, GenerationResult, RelayClient, EMPTY_CANVAS_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use geometry::{DisplaySize, PixelRect, Point, ViewportRect};
pub use input::{EventResponse, InputEvent};
pub use protocol::{ErrorResponse, GenerateRequest, GenerateResponse};
pub use style::{Rgba, StrokeStyle, DEFAULT_STROKE_WIDTH};
pub use surface::{DrawingSurface, PixelRegion, SketchCapture};
