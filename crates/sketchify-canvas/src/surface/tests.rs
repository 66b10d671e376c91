//! Tests for the drawing surface

use super::*;
use crate::export::PNG_DATA_URL_PREFIX;
use crate::geometry::Point;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tiny_skia::Pixmap;

const ORIGIN: ViewportRect = ViewportRect::new(0.0, 0.0, 0.0, 0.0);

fn mounted(width: f32, height: f32, dpr: f32) -> DrawingSurface {
    let mut surface = DrawingSurface::new();
    surface.mount(width, height, dpr).unwrap();
    surface
}

fn stroke(surface: &mut DrawingSurface, from: (f32, f32), to: (f32, f32)) {
    surface.handle_input(&InputEvent::MouseDown(Point::new(from.0, from.1)), &ORIGIN);
    surface.handle_input(&InputEvent::MouseMove(Point::new(to.0, to.1)), &ORIGIN);
    surface.handle_input(&InputEvent::MouseUp, &ORIGIN);
}

fn decode(data_url: &str) -> Pixmap {
    let payload = data_url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
    let bytes = STANDARD.decode(payload).unwrap();
    Pixmap::decode_png(&bytes).unwrap()
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_unmounted_surface_is_inert() {
    let mut surface = DrawingSurface::new();
    assert!(!surface.is_mounted());

    let resp = surface.handle_input(&InputEvent::MouseDown(Point::new(1.0, 1.0)), &ORIGIN);
    assert!(!resp.prevent_default);
    surface.handle_input(&InputEvent::MouseMove(Point::new(5.0, 5.0)), &ORIGIN);

    assert!(!surface.has_ink());
    assert!(surface.export_snapshot().is_none());
    assert!(surface.rgba_pixels().is_none());
    surface.clear();
}

#[test]
fn test_mount_rejects_unusable_geometry() {
    let mut surface = DrawingSurface::new();
    assert!(surface.mount(0.0, 100.0, 1.0).is_err());
    assert!(surface.mount(100.0, 100.0, f32::NAN).is_err());
    assert!(!surface.is_mounted());

    surface.mount(100.0, 100.0, 1.0).unwrap();
    assert!(surface.is_mounted());
}

#[test]
fn test_remount_keeps_existing_buffer() {
    let mut surface = mounted(64.0, 64.0, 2.0);
    stroke(&mut surface, (5.0, 5.0), (20.0, 20.0));

    surface.mount(10.0, 10.0, 1.0).unwrap();
    assert_eq!(
        surface.display_size(),
        Some(DisplaySize {
            width: 64,
            height: 64
        })
    );
    assert!(surface.has_ink());
}

#[test]
fn test_style_set_before_mount_is_applied() {
    let mut surface = DrawingSurface::new();
    surface.set_style(StrokeStyle::new(Rgba::rgb(255, 0, 0), 10.0));
    surface.mount(40.0, 40.0, 1.0).unwrap();

    stroke(&mut surface, (5.0, 20.0), (35.0, 20.0));
    let (w, _, px) = surface.rgba_pixels().unwrap();
    let i = ((20 * w + 20) * 4) as usize;
    assert_eq!(&px[i..i + 4], &[255, 0, 0, 255]);
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_default_suppression() {
    let mut surface = mounted(50.0, 50.0, 1.0);

    let idle_move = surface.handle_input(&InputEvent::MouseMove(Point::new(1.0, 1.0)), &ORIGIN);
    assert!(!idle_move.prevent_default);

    let down = surface.handle_input(&InputEvent::MouseDown(Point::new(1.0, 1.0)), &ORIGIN);
    assert!(down.prevent_default);
    assert!(surface.is_drawing());

    let mv = surface.handle_input(&InputEvent::MouseMove(Point::new(9.0, 9.0)), &ORIGIN);
    assert!(mv.prevent_default);

    let up = surface.handle_input(&InputEvent::MouseUp, &ORIGIN);
    assert!(!up.prevent_default);
    assert!(!surface.is_drawing());
}

#[test]
fn test_move_without_press_draws_nothing() {
    let mut surface = mounted(50.0, 50.0, 1.0);
    surface.handle_input(&InputEvent::MouseMove(Point::new(10.0, 10.0)), &ORIGIN);
    surface.handle_input(&InputEvent::MouseMove(Point::new(40.0, 40.0)), &ORIGIN);

    assert!(!surface.has_ink());
    let (_, _, px) = surface.rgba_pixels().unwrap();
    assert!(px.chunks(4).all(|p| p[3] == 0));
}

#[test]
fn test_release_keeps_ink() {
    for release in [
        InputEvent::MouseUp,
        InputEvent::MouseLeave,
        InputEvent::TouchEnd,
        InputEvent::TouchCancel,
    ] {
        let mut surface = mounted(30.0, 30.0, 1.0);
        surface.handle_input(&InputEvent::MouseDown(Point::new(2.0, 2.0)), &ORIGIN);
        surface.handle_input(&InputEvent::MouseMove(Point::new(20.0, 20.0)), &ORIGIN);
        surface.handle_input(&release, &ORIGIN);

        assert!(!surface.is_drawing());
        assert!(surface.has_ink());
        assert!(surface.export_snapshot().is_some());
    }
}

#[test]
fn test_bounding_box_offset_is_subtracted() {
    let mut surface = mounted(40.0, 40.0, 2.0);
    surface.set_style(StrokeStyle::new(Rgba::WHITE, 4.0));
    let bounds = ViewportRect::new(100.0, 300.0, 40.0, 40.0);

    surface.handle_input(&InputEvent::MouseDown(Point::new(105.0, 310.0)), &bounds);
    surface.handle_input(&InputEvent::MouseMove(Point::new(135.0, 310.0)), &bounds);

    // display (20, 10) -> physical (40, 20) at DPR 2
    let (w, _, px) = surface.rgba_pixels().unwrap();
    let at = |x: u32, y: u32| px[((y * w + x) * 4 + 3) as usize];
    assert_eq!(at(40, 20), 255);
    // without the offset the stroke would run along display y = 310, off-surface
    assert_eq!(at(40, 70), 0);
}

#[test]
fn test_only_first_touch_draws() {
    let mut surface = mounted(60.0, 60.0, 1.0);
    surface.set_style(StrokeStyle::new(Rgba::WHITE, 2.0));

    surface.handle_input(
        &InputEvent::TouchStart(vec![Point::new(5.0, 5.0), Point::new(50.0, 50.0)]),
        &ORIGIN,
    );
    let resp = surface.handle_input(
        &InputEvent::TouchMove(vec![Point::new(5.0, 30.0), Point::new(55.0, 55.0)]),
        &ORIGIN,
    );
    assert!(resp.prevent_default);

    let (w, _, px) = surface.rgba_pixels().unwrap();
    let at = |x: u32, y: u32| px[((y * w + x) * 4 + 3) as usize];
    assert!(at(5, 20) > 0);
    assert_eq!(at(52, 52), 0);
}

#[test]
fn test_touch_without_points_is_ignored() {
    let mut surface = mounted(20.0, 20.0, 1.0);
    let resp = surface.handle_input(&InputEvent::TouchStart(Vec::new()), &ORIGIN);
    assert!(!resp.prevent_default);
    assert!(!surface.is_drawing());
}

/// "has ink" is true iff some move arrived while a stroke was active, for
/// every down/move/up sequence up to length six.
#[test]
fn test_has_ink_iff_active_move() {
    #[derive(Clone, Copy)]
    enum Step {
        Down,
        Move,
        Up,
    }
    const STEPS: [Step; 3] = [Step::Down, Step::Move, Step::Up];

    for len in 0..=6u32 {
        for mut code in 0..3usize.pow(len) {
            let mut surface = mounted(16.0, 16.0, 1.0);
            let mut active = false;
            let mut expected = false;

            for i in 0..len {
                let step = STEPS[code % 3];
                code /= 3;
                let p = Point::new(1.0 + i as f32, 8.0);
                let event = match step {
                    Step::Down => {
                        active = true;
                        InputEvent::MouseDown(p)
                    }
                    Step::Move => {
                        expected |= active;
                        InputEvent::MouseMove(p)
                    }
                    Step::Up => {
                        active = false;
                        InputEvent::MouseUp
                    }
                };
                surface.handle_input(&event, &ORIGIN);
            }

            assert_eq!(surface.has_ink(), expected);
        }
    }
}

// ============================================================================
// Style
// ============================================================================

#[test]
fn test_style_change_is_not_retroactive() {
    let mut surface = mounted(60.0, 60.0, 1.0);
    surface.set_style(StrokeStyle::new(Rgba::rgb(255, 0, 0), 6.0));
    surface.handle_input(&InputEvent::MouseDown(Point::new(5.0, 10.0)), &ORIGIN);
    surface.handle_input(&InputEvent::MouseMove(Point::new(55.0, 10.0)), &ORIGIN);

    // change mid-stroke; the next segment uses it, the first keeps red
    surface.set_color(Rgba::rgb(0, 0, 255));
    surface.handle_input(&InputEvent::MouseMove(Point::new(55.0, 50.0)), &ORIGIN);
    surface.handle_input(&InputEvent::MouseUp, &ORIGIN);

    let (w, _, px) = surface.rgba_pixels().unwrap();
    let rgba = |x: u32, y: u32| {
        let i = ((y * w + x) * 4) as usize;
        [px[i], px[i + 1], px[i + 2], px[i + 3]]
    };
    assert_eq!(rgba(20, 10), [255, 0, 0, 255]);
    assert_eq!(rgba(55, 35), [0, 0, 255, 255]);
}

#[test]
fn test_invalid_width_is_ignored() {
    let mut surface = mounted(10.0, 10.0, 1.0);
    surface.set_line_width(12.0);
    surface.set_line_width(0.0);
    assert_eq!(surface.style().width, 12.0);
}

// ============================================================================
// Clear and export
// ============================================================================

#[test]
fn test_export_without_ink_is_none() {
    let surface = mounted(100.0, 100.0, 2.0);
    assert!(surface.snapshot().unwrap().is_none());
    assert!(surface.export_snapshot().is_none());
}

#[test]
fn test_clear_resets_ink_and_export() {
    let mut surface = mounted(80.0, 80.0, 2.0);
    stroke(&mut surface, (10.0, 10.0), (70.0, 70.0));
    assert!(surface.has_ink());

    surface.clear();
    assert!(!surface.has_ink());
    assert!(surface.export_snapshot().is_none());
    let (_, _, px) = surface.rgba_pixels().unwrap();
    assert!(px.chunks(4).all(|p| p[3] == 0));

    // idempotent
    surface.clear();
    assert!(!surface.has_ink());
}

#[test]
fn test_export_preserves_small_dimensions() {
    let mut surface = mounted(300.0, 200.0, 2.0);
    stroke(&mut surface, (10.0, 10.0), (290.0, 190.0));

    let url = surface.export_snapshot().unwrap();
    assert!(url.starts_with(PNG_DATA_URL_PREFIX));
    let image = decode(&url);
    assert_eq!((image.width(), image.height()), (300, 200));
}

#[test]
fn test_export_downscales_large_surface() {
    let mut surface = mounted(2048.0, 1000.0, 1.0);
    stroke(&mut surface, (10.0, 10.0), (2000.0, 900.0));

    let snapshot = surface.snapshot().unwrap().unwrap();
    assert_eq!((snapshot.width(), snapshot.height()), (1024, 500));

    let image = decode(&snapshot.to_data_url());
    assert_eq!((image.width(), image.height()), (1024, 500));
}

#[test]
fn test_export_is_opaque_with_ink_composited() {
    let mut surface = mounted(40.0, 40.0, 2.0);
    surface.set_style(StrokeStyle::new(Rgba::WHITE, 10.0));
    stroke(&mut surface, (0.0, 20.0), (40.0, 20.0));

    let image = decode(&surface.export_snapshot().unwrap());
    assert_eq!((image.width(), image.height()), (40, 40));
    assert!(image.pixels().iter().all(|p| p.alpha() == 255));

    let ink = image.pixel(20, 20).unwrap();
    assert_eq!((ink.red(), ink.green(), ink.blue()), (255, 255, 255));
    let bg = image.pixel(20, 2).unwrap();
    assert_eq!((bg.red(), bg.green(), bg.blue()), (0, 0, 0));
}

#[test]
fn test_draw_clear_draw_exports_again() {
    let mut surface = mounted(50.0, 50.0, 1.0);
    stroke(&mut surface, (5.0, 5.0), (45.0, 45.0));
    surface.clear();
    stroke(&mut surface, (5.0, 45.0), (45.0, 5.0));
    assert!(surface.export_snapshot().is_some());
}

// ============================================================================
// Incremental repaint
// ============================================================================

#[test]
fn test_dirty_region_covers_only_new_segment() {
    let mut surface = mounted(200.0, 100.0, 2.0);
    surface.set_style(StrokeStyle::new(Rgba::rgb(255, 0, 0), 4.0));
    stroke(&mut surface, (20.0, 50.0), (40.0, 50.0));

    let region = surface.take_dirty_region().unwrap();
    assert_eq!(region.rect, PixelRect::new(34, 94, 52, 12));
    assert_eq!(region.rgba.len(), 52 * 12 * 4);

    // bytes match the full copy at the same coordinates
    let (width, _, full) = surface.rgba_pixels().unwrap();
    let (x, y) = (60usize, 100usize);
    let full_at = (y * width as usize + x) * 4;
    let local_at = ((y - 94) * 52 + (x - 34)) * 4;
    assert_eq!(&region.rgba[local_at..local_at + 4], &full[full_at..full_at + 4]);
    assert_eq!(&full[full_at..full_at + 4], &[255, 0, 0, 255]);

    assert!(surface.take_dirty_region().is_none());
}

#[test]
fn test_clear_marks_whole_buffer_dirty() {
    let mut surface = mounted(30.0, 20.0, 1.5);
    surface.clear();
    let region = surface.take_dirty_region().unwrap();
    assert_eq!(region.rect, PixelRect::new(0, 0, 45, 30));
    assert!(region.rgba.iter().all(|b| *b == 0));
}

#[test]
fn test_unmounted_surface_has_no_dirty_region() {
    let mut surface = DrawingSurface::new();
    surface.clear();
    assert!(surface.take_dirty_region().is_none());
}
