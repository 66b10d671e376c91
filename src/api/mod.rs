//! Web API module for Sketchify
//!
//! Provides REST API endpoints for:
//! - Generation relay (`POST /api/generate`)
//! - Health checks

pub mod generate;
pub mod health;

use axum::Router;

pub use generate::{generate_routes, RelayError, RelayState};
pub use health::health_routes;

/// Create the API router with all endpoints
pub fn api_router() -> Router {
    Router::new()
        .merge(health_routes())
        .merge(generate_routes())
}
