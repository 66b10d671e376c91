//! Server configuration types
//!
//! Contains all configuration structures for the Sketchify relay.

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the built web client; `index.html` is the SPA entry
    #[serde(default = "default_web_root")]
    pub web_root: String,
    /// Largest accepted request body (sketches travel as base64 PNG)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_web_root() -> String {
    "apps/web/dist".to_string()
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

/// Generative model configuration. The API key is never part of it; it is
/// read from the environment by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_response_modalities")]
    pub response_modalities: Vec<String>,
    /// Upstream timeout; unset waits as long as the model takes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            response_modalities: default_response_modalities(),
            timeout_secs: None,
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    sketchify_llm::gemini::DEFAULT_MODEL.to_string()
}

fn default_response_modalities() -> Vec<String> {
    sketchify_llm::gemini::DEFAULT_RESPONSE_MODALITIES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}
