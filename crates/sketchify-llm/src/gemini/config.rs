//! Gemini provider configuration

use crate::error::{Error, Result};
use crate::util::mask_api_key;
use std::fmt;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model: image-capable so a sketch can come back restyled
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Output modalities requested when none are configured
pub const DEFAULT_RESPONSE_MODALITIES: &[&str] = &["TEXT", "IMAGE"];

/// First non-blank key; a blank `GEMINI_API_KEY` falls through to `GOOGLE_API_KEY`.
pub(crate) fn resolve_api_key(gemini: Option<String>, google: Option<String>) -> Option<String> {
    [gemini, google]
        .into_iter()
        .flatten()
        .find(|k| !k.trim().is_empty())
}

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key, sent as `x-goog-api-key`
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// `generationConfig.responseModalities`; empty leaves it unset
    pub response_modalities: Vec<String>,
    /// Request timeout; `None` waits as long as the upstream takes
    pub timeout: Option<Duration>,
}

// SECURITY: Custom Debug implementation to mask credentials
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("response_modalities", &self.response_modalities)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            response_modalities: DEFAULT_RESPONSE_MODALITIES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            timeout: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` (falling back to `GOOGLE_API_KEY`), and the
    /// optional `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = resolve_api_key(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("GOOGLE_API_KEY").ok(),
        )
        .ok_or_else(|| Error::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.default_model = model;
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set requested output modalities
    #[must_use]
    pub fn with_response_modalities<I, S>(mut self, modalities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_modalities = modalities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
