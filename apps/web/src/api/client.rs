//! HTTP API Client

use async_trait::async_trait;
use gloo_net::http::Request;
use sketchify_canvas::{ErrorResponse, GenerateRequest, GenerateResponse, RelayClient};

/// API client for the generation relay
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for the origin that served the page
    pub fn new() -> Self {
        let base_url = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Self { base_url }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl RelayClient for ApiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, String> {
        let url = format!("{}/api/generate", self.base_url);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.ok() {
            return response
                .json::<GenerateResponse>()
                .await
                .map_err(|e| e.to_string());
        }

        // Non-2xx: prefer the relay's message, fall back to the status line
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )),
        }
    }
}
