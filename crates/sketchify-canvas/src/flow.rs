//! Client-side generate flow
//!
//! Export the sketch, call the relay, and keep the state a UI renders: a
//! loading flag, the last error and the last result. UI hosts that cannot
//! hold `&mut self` across an await use [`GenerateFlow::begin`] and
//! [`GenerateFlow::finish`] around their own request.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::export::strip_data_url_header;
use crate::protocol::{GenerateRequest, GenerateResponse};
use crate::surface::SketchCapture;

/// Shown when Generate is pressed on a blank canvas
pub const EMPTY_CANVAS_MESSAGE: &str = "The canvas is empty. Draw something first!";

/// Shown when a relay failure carries no message
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate image.";

/// Transport to the generation relay.
///
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait(?Send)]
pub trait RelayClient {
    /// Send one request; `Err` carries a human-readable message.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, String>;
}

/// What the relay produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// Displayable `data:` URL
    Image(String),
    /// Plain text
    Text(String),
}

impl From<GenerateResponse> for GenerationResult {
    fn from(resp: GenerateResponse) -> Self {
        match resp.mime_type {
            Some(mime) => Self::Image(format!("data:{};base64,{}", mime, resp.output)),
            None => Self::Text(resp.output),
        }
    }
}

/// Generate button state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateFlow {
    loading: bool,
    error: Option<String>,
    result: Option<GenerationResult>,
}

impl GenerateFlow {
    /// Create an idle flow
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare a request from the current sketch.
    ///
    /// Returns `None` and records the empty-canvas error when there is nothing
    /// to send; no request must be issued in that case.
    pub fn begin(&mut self, capture: &impl SketchCapture, prompt: &str) -> Option<GenerateRequest> {
        let Some(data_url) = capture.export_snapshot() else {
            debug!("Generate requested on an empty canvas");
            self.error = Some(EMPTY_CANVAS_MESSAGE.to_string());
            return None;
        };

        self.loading = true;
        self.error = None;
        self.result = None;
        Some(GenerateRequest::new(prompt).with_image(strip_data_url_header(&data_url)))
    }

    /// Record the relay's answer to the request produced by [`Self::begin`].
    pub fn finish(&mut self, outcome: Result<GenerateResponse, String>) {
        self.loading = false;
        match outcome {
            Ok(resp) => {
                self.error = None;
                self.result = Some(resp.into());
            }
            Err(message) => {
                warn!(error = %message, "Generation failed");
                self.result = None;
                self.error = Some(if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                });
            }
        }
    }

    /// Run the whole flow against `client`.
    pub async fn generate<C>(&mut self, capture: &impl SketchCapture, prompt: &str, client: &C)
    where
        C: RelayClient + ?Sized,
    {
        let Some(request) = self.begin(capture, prompt) else {
            return;
        };
        let outcome = client.generate(&request).await;
        self.finish(outcome);
    }

    /// Whether a request is outstanding
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last error message
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last successful result
    #[must_use]
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, ViewportRect};
    use crate::input::InputEvent;
    use crate::surface::DrawingSurface;
    use std::cell::RefCell;

    /// Records requests and replays one canned outcome.
    struct ScriptedRelay {
        outcome: Result<GenerateResponse, String>,
        seen: RefCell<Vec<GenerateRequest>>,
    }

    impl ScriptedRelay {
        fn new(outcome: Result<GenerateResponse, String>) -> Self {
            Self {
                outcome,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl RelayClient for ScriptedRelay {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, String> {
            self.seen.borrow_mut().push(request.clone());
            self.outcome.clone()
        }
    }

    fn sketched() -> DrawingSurface {
        let rect = ViewportRect::default();
        let mut surface = DrawingSurface::new();
        surface.mount(64.0, 64.0, 1.0).unwrap();
        surface.handle_input(&InputEvent::MouseDown(Point::new(4.0, 4.0)), &rect);
        surface.handle_input(&InputEvent::MouseMove(Point::new(60.0, 60.0)), &rect);
        surface.handle_input(&InputEvent::MouseUp, &rect);
        surface
    }

    fn text(output: &str) -> GenerateResponse {
        GenerateResponse {
            output: output.to_string(),
            mime_type: None,
        }
    }

    #[tokio::test]
    async fn test_empty_canvas_makes_no_request() {
        let mut surface = DrawingSurface::new();
        surface.mount(64.0, 64.0, 1.0).unwrap();
        let relay = ScriptedRelay::new(Ok(text("unused")));
        let mut flow = GenerateFlow::new();

        flow.generate(&surface, "paint it", &relay).await;

        assert_eq!(flow.error(), Some(EMPTY_CANVAS_MESSAGE));
        assert!(relay.seen.borrow().is_empty());
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn test_success_sets_result_and_clears_error() {
        let surface = sketched();
        let relay = ScriptedRelay::new(Ok(GenerateResponse {
            output: "X".to_string(),
            mime_type: Some("image/png".to_string()),
        }));
        let mut flow = GenerateFlow::new();

        // leave a stale error behind first
        flow.generate(&DrawingSurface::new(), "p", &relay).await;
        assert!(flow.error().is_some());

        flow.generate(&surface, "watercolor", &relay).await;

        assert_eq!(flow.error(), None);
        assert_eq!(
            flow.result(),
            Some(&GenerationResult::Image("data:image/png;base64,X".to_string()))
        );

        let seen = relay.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "watercolor");
        let image = seen[0].image.as_deref().unwrap();
        assert!(!image.starts_with("data:"));
        assert!(!image.is_empty());
    }

    #[tokio::test]
    async fn test_text_output_kept_as_text() {
        let relay = ScriptedRelay::new(Ok(text("a cat")));
        let mut flow = GenerateFlow::new();
        flow.generate(&sketched(), "describe", &relay).await;
        assert_eq!(flow.result(), Some(&GenerationResult::Text("a cat".to_string())));
    }

    #[test]
    fn test_failure_message_surfaces() {
        let relay = ScriptedRelay::new(Err("quota exceeded".to_string()));
        let mut flow = GenerateFlow::new();
        tokio_test::block_on(flow.generate(&sketched(), "p", &relay));
        assert_eq!(flow.error(), Some("quota exceeded"));
        assert!(flow.result().is_none());
    }

    #[test]
    fn test_blank_failure_uses_fallback() {
        let relay = ScriptedRelay::new(Err("  ".to_string()));
        let mut flow = GenerateFlow::new();
        tokio_test::block_on(flow.generate(&sketched(), "p", &relay));
        assert_eq!(flow.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_draw_clear_generate_is_empty_canvas() {
        let mut surface = sketched();
        surface.clear();
        let relay = ScriptedRelay::new(Ok(text("unused")));
        let mut flow = GenerateFlow::new();

        flow.generate(&surface, "p", &relay).await;

        assert_eq!(flow.error(), Some(EMPTY_CANVAS_MESSAGE));
        assert!(relay.seen.borrow().is_empty());
    }

    #[test]
    fn test_begin_marks_loading() {
        let mut flow = GenerateFlow::new();
        let request = flow.begin(&sketched(), "p");
        assert!(request.is_some());
        assert!(flow.is_loading());

        flow.finish(Ok(text("done")));
        assert!(!flow.is_loading());
    }
}
