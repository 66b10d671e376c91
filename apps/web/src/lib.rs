//! Sketchify Web Client
//!
//! Draw on a canvas, describe what it should become, and let the relay turn
//! it into an image. Built with Leptos.

pub mod api;
pub mod app;
pub mod components;

pub use app::App;
