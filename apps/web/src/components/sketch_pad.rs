//! Sketch pad component
//!
//! Hosts a [`DrawingSurface`] on a `<canvas>`. Pointer and touch events are
//! translated into [`InputEvent`]s. The whole backing store is copied into the
//! canvas once at mount; afterwards only the region a stroke segment or clear
//! touched is repainted.

use gloo_events::{EventListener, EventListenerOptions};
use leptos::*;
use sketchify_canvas::{DrawingSurface, InputEvent, PixelRegion, Point, ViewportRect};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, ImageData, MouseEvent, TouchEvent};

type Convert = fn(&Event) -> Option<InputEvent>;

const LISTENERS: [(&str, Convert); 8] = [
    ("mousedown", |e| mouse(e).map(InputEvent::MouseDown)),
    ("mousemove", |e| mouse(e).map(InputEvent::MouseMove)),
    ("mouseup", |_| Some(InputEvent::MouseUp)),
    ("mouseleave", |_| Some(InputEvent::MouseLeave)),
    ("touchstart", |e| touches(e).map(InputEvent::TouchStart)),
    ("touchmove", |e| touches(e).map(InputEvent::TouchMove)),
    ("touchend", |_| Some(InputEvent::TouchEnd)),
    ("touchcancel", |_| Some(InputEvent::TouchCancel)),
];

fn mouse(event: &Event) -> Option<Point> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|m| Point::new(m.client_x() as f32, m.client_y() as f32))
}

fn touches(event: &Event) -> Option<Vec<Point>> {
    let list = event.dyn_ref::<TouchEvent>()?.touches();
    Some(
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| Point::new(t.client_x() as f32, t.client_y() as f32))
            .collect(),
    )
}

fn bounds(canvas: &HtmlCanvasElement) -> ViewportRect {
    let rect = canvas.get_bounding_client_rect();
    ViewportRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
    if ctx.is_none() {
        tracing::warn!("2d context unavailable");
    }
    ctx
}

fn put_pixels(ctx: &CanvasRenderingContext2d, rgba: &[u8], x: u32, y: u32, width: u32, height: u32) {
    match ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width, height) {
        Ok(image) => {
            if let Err(e) = ctx.put_image_data(&image, f64::from(x), f64::from(y)) {
                tracing::warn!(error = ?e, "put_image_data failed");
            }
        }
        Err(e) => tracing::warn!(error = ?e, "ImageData allocation failed"),
    }
}

/// Size the canvas to the backing store and copy all of it.
fn blit_full(canvas: &HtmlCanvasElement, surface: StoredValue<DrawingSurface>) {
    let Some((width, height, pixels)) = surface.with_value(|s| s.rgba_pixels()) else {
        return;
    };
    // a full copy supersedes anything pending
    surface.update_value(|s| {
        s.take_dirty_region();
    });
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
    if let Some(ctx) = context_2d(canvas) {
        put_pixels(&ctx, &pixels, 0, 0, width, height);
    }
}

/// Copy only what changed since the last repaint.
fn blit_dirty(canvas: &HtmlCanvasElement, surface: StoredValue<DrawingSurface>) {
    let Some(Some(PixelRegion { rect, rgba })) =
        surface.try_update_value(|s| s.take_dirty_region())
    else {
        return;
    };
    if let Some(ctx) = context_2d(canvas) {
        put_pixels(&ctx, &rgba, rect.x, rect.y, rect.width, rect.height);
    }
}

fn attach(
    canvas: &HtmlCanvasElement,
    surface: StoredValue<DrawingSurface>,
    on_change: Callback<()>,
) -> Vec<EventListener> {
    LISTENERS
        .into_iter()
        .map(|(name, convert)| {
            let target = canvas.clone();
            // Touch listeners must not be passive or prevent_default is ignored
            EventListener::new_with_options(
                canvas,
                name,
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(input) = convert(event) else {
                        return;
                    };
                    let rect = bounds(&target);
                    let response = surface.try_update_value(|s| s.handle_input(&input, &rect));
                    if response.is_some_and(|r| r.prevent_default) {
                        event.prevent_default();
                        blit_dirty(&target, surface);
                    }
                    on_change.call(());
                },
            )
        })
        .collect()
}

/// Drawing canvas bound to a shared surface.
///
/// `redraw` is bumped by the owner after it changes the surface out of band
/// (for example after a clear).
#[component]
pub fn SketchPad(
    surface: StoredValue<DrawingSurface>,
    #[prop(into)] redraw: Signal<u32>,
    #[prop(into)] on_change: Callback<()>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let Some(el) = canvas_ref.get() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &el;
        let canvas = canvas.clone();

        let rect = canvas.get_bounding_client_rect();
        let pixel_ratio = window().device_pixel_ratio() as f32;
        let mounted = surface.try_update_value(|s| {
            s.mount(rect.width() as f32, rect.height() as f32, pixel_ratio)
        });
        match mounted {
            Some(Ok(())) => {
                tracing::info!(
                    width = rect.width(),
                    height = rect.height(),
                    pixel_ratio,
                    "Sketch pad mounted"
                );
                blit_full(&canvas, surface);
            }
            Some(Err(e)) => tracing::warn!(error = %e, "Sketch pad could not be mounted"),
            None => {}
        }

        let listeners = attach(&canvas, surface, on_change);
        on_cleanup(move || drop(listeners));
    });

    create_effect(move |_| {
        redraw.track();
        if let Some(el) = canvas_ref.get_untracked() {
            let canvas: &HtmlCanvasElement = &el;
            blit_dirty(canvas, surface);
        }
    });

    view! {
        <canvas node_ref=canvas_ref class="sketch-pad"></canvas>
    }
}
