//! Google Gemini provider
//!
//! Calls the `generateContent` endpoint with a prompt and, optionally, an
//! inline sketch image, and returns the first generated image or the text.

mod config;
mod provider;
mod types;

pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_RESPONSE_MODALITIES};
pub use provider::GeminiProvider;
