//! Provider trait and request/response types

use crate::error::Result;

/// Inline image sent alongside the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Media type, e.g. `image/png`
    pub mime_type: String,
    /// Base64 payload without a data-URL header
    pub data: String,
}

impl ImageInput {
    /// PNG payload
    #[must_use]
    pub fn png(data: impl Into<String>) -> Self {
        Self {
            mime_type: "image/png".to_string(),
            data: data.into(),
        }
    }
}

/// One generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Prompt forwarded verbatim
    pub prompt: String,
    /// Optional sketch to condition on
    pub image: Option<ImageInput>,
    /// Model override; empty means the provider default
    pub model: String,
}

impl GenerationRequest {
    /// Text-only request for the default model
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
            model: String::new(),
        }
    }

    /// Attach an image
    #[must_use]
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// What the model produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutput {
    /// Generated text
    Text(String),
    /// Generated image
    Image {
        /// Media type
        mime_type: String,
        /// Base64 payload
        data: String,
    },
}

/// Trait for generative model providers
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Run one generation. No retries are attempted.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput>;
}
