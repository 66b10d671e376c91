//! Stroke controls

use leptos::*;
use sketchify_canvas::{Rgba, StrokeStyle};

/// Parse a `<input type="range">` value into a usable stroke width.
pub fn parse_width(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|w| StrokeStyle::is_valid_width(*w))
}

/// Color picker, width slider, and clear button
#[component]
pub fn Toolbar(
    color: ReadSignal<Rgba>,
    set_color: WriteSignal<Rgba>,
    width: ReadSignal<f32>,
    set_width: WriteSignal<f32>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let on_color = move |ev: ev::Event| match event_target_value(&ev).parse::<Rgba>() {
        Ok(c) => set_color.set(c),
        Err(e) => tracing::debug!(error = %e, "Ignoring color"),
    };

    let on_width = move |ev: ev::Event| {
        if let Some(w) = parse_width(&event_target_value(&ev)) {
            set_width.set(w);
        }
    };

    view! {
        <div class="toolbar">
            <label>
                "Color "
                <input type="color" prop:value=move || color.get().to_string() on:input=on_color />
            </label>
            <label>
                "Width "
                <input
                    type="range"
                    min="1"
                    max="40"
                    prop:value=move || width.get().to_string()
                    on:input=on_width
                />
                <span>{move || format!("{:.0}px", width.get())}</span>
            </label>
            <button on:click=move |_| on_clear.call(())>"Clear"</button>
        </div>
    }
}
