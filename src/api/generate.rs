//! Generation relay endpoint
//!
//! `POST /api/generate` forwards a prompt (and an optional sketch) to the
//! configured model and returns its first output. The API key stays on the
//! server; clients only ever see the output or a fault message.

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use sketchify_canvas::protocol::{ErrorResponse, GenerateRequest, GenerateResponse};
use sketchify_llm::{
    Error as LlmError, GenerationOutput, GenerationProvider, GenerationRequest, ImageInput,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Message returned while no provider could be built at startup
pub const MISSING_KEY_MESSAGE: &str = "GEMINI_API_KEY is not set";

/// Shared relay state
#[derive(Clone)]
pub struct RelayState {
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl RelayState {
    /// Relay backed by `provider`; requests use the provider's default model
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Relay without a provider; every request fails with a configuration error
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Whether a provider is available
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}

/// Relay failure, rendered as `500 {"error": ...}`
#[derive(Debug)]
pub struct RelayError(LlmError);

impl From<LlmError> for RelayError {
    fn from(err: LlmError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.0.to_string())),
        )
            .into_response()
    }
}

/// Forward one generation request to the provider
async fn generate(
    Extension(state): Extension<RelayState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, RelayError> {
    let Some(provider) = state.provider.as_ref() else {
        warn!("Generation requested but no provider is configured");
        return Err(LlmError::NotConfigured(MISSING_KEY_MESSAGE.to_string()).into());
    };

    info!(
        provider = provider.name(),
        prompt_len = body.prompt.len(),
        has_image = body.image.is_some(),
        "Relaying generation request"
    );

    let mut request = GenerationRequest::new(body.prompt);
    if let Some(image) = body.image {
        request = request.with_image(ImageInput::png(image));
    }

    let output = provider.generate(request).await.map_err(|e| {
        error!(code = e.code(), error = %e, "Generation failed");
        RelayError::from(e)
    })?;

    let response = match output {
        GenerationOutput::Text(text) => GenerateResponse {
            output: text,
            mime_type: None,
        },
        GenerationOutput::Image { mime_type, data } => GenerateResponse {
            output: data,
            mime_type: Some(mime_type),
        },
    };
    Ok(Json(response))
}

/// Create generation routes
pub fn generate_routes() -> Router {
    Router::new().route("/api/generate", post(generate))
}
