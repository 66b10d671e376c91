//! Generation provider resolution

use super::config::LlmConfig;
use crate::api::RelayState;
use sketchify_llm::{GeminiConfig, GeminiProvider, GenerationProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build the provider named in `llm`, or `None` when it cannot be configured.
///
/// A missing API key is not fatal: the server still serves the web client and
/// `/api/generate` answers with a configuration error.
pub fn resolve_generation_provider(llm: &LlmConfig) -> Option<Arc<dyn GenerationProvider>> {
    match llm.provider.as_str() {
        "gemini" => {
            let config = match GeminiConfig::from_env() {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, "Gemini provider unavailable");
                    return None;
                }
            };
            let config = gemini_config(config, llm);
            match GeminiProvider::new(config) {
                Ok(provider) => {
                    info!(model = %provider.default_model(), "Gemini provider configured");
                    Some(Arc::new(provider))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to create Gemini provider");
                    None
                }
            }
        }
        other => {
            warn!(provider = %other, "Unknown generation provider");
            None
        }
    }
}

/// Apply file/env settings on top of the key-bearing base config
fn gemini_config(base: GeminiConfig, llm: &LlmConfig) -> GeminiConfig {
    let config = base
        .with_model(llm.model.clone())
        .with_response_modalities(llm.response_modalities.iter().cloned());
    match llm.timeout_secs {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}

/// Relay state for the resolved provider
pub fn relay_state(llm: &LlmConfig) -> RelayState {
    match resolve_generation_provider(llm) {
        Some(provider) => RelayState::new(provider),
        None => RelayState::unconfigured(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_config_applies_settings() {
        let llm = LlmConfig {
            model: "gemini-2.5-flash".to_string(),
            response_modalities: vec!["IMAGE".to_string()],
            timeout_secs: Some(45),
            ..LlmConfig::default()
        };
        let config = gemini_config(GeminiConfig::new("k"), &llm);

        assert_eq!(config.api_key, "k");
        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.response_modalities, vec!["IMAGE".to_string()]);
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_no_timeout_by_default() {
        let config = gemini_config(GeminiConfig::new("k"), &LlmConfig::default());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_unknown_provider_is_none() {
        let llm = LlmConfig {
            provider: "nope".to_string(),
            ..LlmConfig::default()
        };
        assert!(resolve_generation_provider(&llm).is_none());
        assert!(!relay_state(&llm).is_configured());
    }
}
