//! Sketchify relay server
//!
//! Serves the sketch web client and relays generation requests to the model
//! provider so the API key never reaches the browser.

#![forbid(unsafe_code)]

pub mod api;
pub mod server;
