//! Wire types for the generation relay
//!
//! Shared by the relay server and its clients so both ends agree on the JSON
//! shape of `POST /api/generate`.

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Instruction forwarded to the model verbatim
    pub prompt: String,
    /// Raw base64 PNG of the sketch, data-URL header removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl GenerateRequest {
    /// Text-only request
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Attach a base64 image payload
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Success body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Generated text, or base64 image data when `mime_type` is set
    pub output: String,
    /// Media type of `output` when it is an image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Failure body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable fault message
    pub error: String,
}

impl ErrorResponse {
    /// Create an error body
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
