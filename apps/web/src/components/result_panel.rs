//! Generation status and output

use leptos::*;
use sketchify_canvas::{GenerateFlow, GenerationResult};

#[component]
pub fn ResultPanel(#[prop(into)] flow: Signal<GenerateFlow>) -> impl IntoView {
    view! {
        <div class="result">
            <Show when=move || flow.with(|f| f.is_loading())>
                <p>"Generating..."</p>
            </Show>
            {move || flow.with(|f| f.error().map(|e| view! { <p class="error">{e.to_string()}</p> }))}
            {move || {
                flow.with(|f| match f.result() {
                    Some(GenerationResult::Image(src)) => {
                        view! { <img src=src.clone() alt="Generated image" /> }.into_view()
                    }
                    Some(GenerationResult::Text(text)) => view! { <p>{text.clone()}</p> }.into_view(),
                    None => ().into_view(),
                })
            }}
        </div>
    }
}
