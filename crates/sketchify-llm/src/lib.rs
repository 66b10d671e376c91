//! Sketchify LLM - Generative Model Providers
//!
//! This crate provides model integration for the Sketchify relay:
//! - Provider: the `GenerationProvider` trait and request/output types
//! - Gemini: Google Gemini `generateContent` (text + inline image)
//! - Mock: scripted provider for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gemini;
pub mod mock;
pub mod provider;
pub mod util;

pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use mock::MockProvider;
pub use provider::{GenerationOutput, GenerationProvider, GenerationRequest, ImageInput};
