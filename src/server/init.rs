//! Server initialization
//!
//! Assembles the router and runs the HTTP server until a shutdown signal.

use super::config::{AppConfig, ServerConfig};
use super::loader::load_config;
use super::providers::relay_state;
use super::shutdown::wait_for_shutdown_signal;
use crate::api::{api_router, RelayState};
use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Build the full application router: API, health, and the web client.
pub fn build_app(state: RelayState, server: &ServerConfig) -> Router {
    let app = api_router()
        .layer(Extension(state))
        .layer(DefaultBodyLimit::max(server.max_body_bytes));

    // Web UI static files (SPA fallback)
    let web_root = Path::new(&server.web_root);
    let app = if web_root.join("index.html").exists() {
        info!("Web UI enabled: serving from {}", web_root.display());
        // Serve static files, fallback to index.html for client-side routes
        let serve_dir = ServeDir::new(web_root)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(web_root.join("index.html")));
        app.fallback_service(serve_dir)
    } else {
        warn!(
            "Web UI not found at {}; build apps/web to enable it",
            web_root.display()
        );
        app.route("/", get(|| async { "Sketchify relay" }))
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Main server run loop
pub async fn run() -> Result<()> {
    let config = load_config()?;
    serve(config).await
}

/// Run the server with an already loaded configuration
pub async fn serve(config: AppConfig) -> Result<()> {
    let state = relay_state(&config.llm);
    if !state.is_configured() {
        warn!("No generation provider configured; /api/generate will return errors");
    }

    let app = build_app(state, &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Sketchify shutdown complete");
    Ok(())
}
