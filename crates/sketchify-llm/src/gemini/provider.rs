//! Gemini provider implementation

use super::config::GeminiConfig;
use super::types::*;
use crate::error::{Error, Result};
use crate::provider::{GenerationOutput, GenerationProvider, GenerationRequest};
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::from)?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Provider configuration
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let mut parts = vec![GeminiPart::Text {
            text: request.prompt.clone(),
        }];
        if let Some(image) = &request.image {
            parts.push(GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        let generation_config = (!self.config.response_modalities.is_empty()).then(|| {
            GenerationConfig {
                response_modalities: self.config.response_modalities.clone(),
            }
        });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config,
        }
    }

    /// Single attempt against `models/{model}:generateContent`.
    async fn send_request(&self, model: &str, request: &GeminiRequest) -> Result<GeminiResponse> {
        // SECURITY: key travels in a header, never in the URL
        debug!("Sending request to Gemini model: {}", model);

        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "Gemini API error response");
            if let Ok(error) = serde_json::from_str::<GeminiError>(&body) {
                warn!(
                    error_status = %error.error.status,
                    error_code = error.error.code,
                    "Gemini API error detail"
                );
                return Err(Error::Upstream(error.error.message));
            }
            // SECURITY: Don't expose raw HTTP response body
            return Err(Error::Upstream(format!("HTTP {}", status)));
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Pick the first inline image, otherwise the joined text.
pub(crate) fn extract_output(response: GeminiResponse) -> Result<GenerationOutput> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(Error::Upstream(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse("No candidates in response".to_string()))?;
    let finish_reason = candidate.finish_reason;
    let Some(content) = candidate.content else {
        return Err(match finish_reason.as_deref() {
            Some(reason) if is_block_reason(reason) => {
                Error::Upstream(format!("response blocked: {}", reason))
            }
            reason => Error::InvalidResponse(format!(
                "empty response (finish reason: {})",
                reason.unwrap_or("unknown")
            )),
        });
    };

    let mut text = String::new();
    for part in content.parts {
        match part {
            GeminiPart::InlineData { inline_data } => {
                return Ok(GenerationOutput::Image {
                    mime_type: inline_data.mime_type,
                    data: inline_data.data,
                });
            }
            GeminiPart::Text { text: t } => text.push_str(&t),
            GeminiPart::Other(_) => {}
        }
    }

    if text.is_empty() {
        if let Some(reason) = finish_reason.as_deref().filter(|r| is_block_reason(r)) {
            return Err(Error::Upstream(format!("response blocked: {}", reason)));
        }
    }
    Ok(GenerationOutput::Text(text))
}

/// Finish reasons that mean the output was withheld rather than empty.
fn is_block_reason(reason: &str) -> bool {
    matches!(
        reason,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" | "IMAGE_SAFETY"
    )
}

#[async_trait::async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model, has_image = request.image.is_some()))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };

        let gemini_request = self.build_request(&request);
        let response = self.send_request(model, &gemini_request).await?;
        extract_output(response)
    }
}
