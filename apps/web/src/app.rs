//! Main Application Component

use leptos::*;
use leptos_meta::*;
use sketchify_canvas::{
    DrawingSurface, GenerateFlow, RelayClient, Rgba, SketchCapture, StrokeStyle,
    DEFAULT_STROKE_WIDTH,
};

use crate::api::ApiClient;
use crate::components::{ResultPanel, SketchPad, Toolbar};

const DEFAULT_PROMPT: &str =
    "Turn this sketch into a detailed, colorful illustration. Keep the composition.";

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let surface = store_value(DrawingSurface::new());
    let (color, set_color) = create_signal(Rgba::WHITE);
    let (width, set_width) = create_signal(DEFAULT_STROKE_WIDTH);
    let (prompt, set_prompt) = create_signal(DEFAULT_PROMPT.to_string());
    let (has_ink, set_has_ink) = create_signal(false);
    let (redraw, set_redraw) = create_signal(0u32);
    let (flow, set_flow) = create_signal(GenerateFlow::new());

    // Style changes apply to strokes drawn afterwards
    create_effect(move |_| {
        let style = StrokeStyle::new(color.get(), width.get());
        surface.update_value(|s| s.set_style(style));
    });

    let on_change = move |_| set_has_ink.set(surface.with_value(|s| s.has_ink()));

    let on_clear = move |_| {
        surface.update_value(|s| s.clear());
        set_has_ink.set(false);
        set_redraw.update(|n| *n = n.wrapping_add(1));
    };

    let on_generate = move |_| {
        if flow.with_untracked(|f| f.is_loading()) {
            return;
        }
        let text = prompt.get_untracked();
        let mut request = None;
        surface.with_value(|s| set_flow.update(|f| request = f.begin(s, &text)));
        let Some(request) = request else {
            return;
        };

        spawn_local(async move {
            let outcome = ApiClient::new().generate(&request).await;
            set_flow.update(|f| f.finish(outcome));
        });
    };

    view! {
        <Title text="Sketchify" />
        <Meta name="description" content="Draw a sketch and turn it into an image" />

        <main class="app">
            <h1>"Sketchify"</h1>
            <Toolbar
                color=color
                set_color=set_color
                width=width
                set_width=set_width
                on_clear=on_clear
            />
            <SketchPad surface=surface redraw=redraw on_change=on_change />
            <div class="prompt-row">
                <textarea
                    prop:value=move || prompt.get()
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
                <button
                    on:click=on_generate
                    disabled=move || flow.with(|f| f.is_loading())
                    title=move || if has_ink.get() { "" } else { "Draw something first" }
                >
                    {move || if flow.with(|f| f.is_loading()) { "Generating..." } else { "Generate" }}
                </button>
            </div>
            <ResultPanel flow=flow />
        </main>
    }
}
