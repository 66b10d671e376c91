//! Mock provider for testing
//!
//! Replays queued outcomes in order and records every request it receives.

use crate::error::{Error, Result};
use crate::provider::{GenerationOutput, GenerationProvider, GenerationRequest};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock provider that returns queued outcomes or a default text output.
#[derive(Clone, Default)]
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Result<GenerationOutput>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful output.
    pub fn push_output(&self, output: GenerationOutput) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(output));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: Error) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl GenerationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutput> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| Ok(GenerationOutput::Text("mock response".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let mock = MockProvider::new();
        mock.push_output(GenerationOutput::Text("first".to_string()));
        mock.push_error(Error::Upstream("second".to_string()));

        let a = mock.generate(GenerationRequest::new("a")).await.unwrap();
        assert_eq!(a, GenerationOutput::Text("first".to_string()));

        let b = mock.generate(GenerationRequest::new("b")).await.unwrap_err();
        assert_eq!(b.to_string(), "second");

        let c = mock.generate(GenerationRequest::new("c")).await.unwrap();
        assert_eq!(c, GenerationOutput::Text("mock response".to_string()));

        let prompts: Vec<_> = mock.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }
}
