use leptos::*;
use sketchify_web::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // Initialize tracing for WASM
        tracing_wasm::set_as_global_default();

        tracing::info!("Starting Sketchify web client");

        // Mount the app
        mount_to_body(|| view! { <App /> });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("This binary is intended for the browser (WASM).");
        eprintln!("Please use `trunk serve` or `trunk build` to run it.");
    }
}
