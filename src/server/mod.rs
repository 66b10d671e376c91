//! Server module for Sketchify
//!
//! Contains the main server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `providers`: Generation provider resolution
//! - `shutdown`: Signal handling for graceful shutdown
//! - `init`: Router assembly and the run loop

pub mod config;
mod init;
mod loader;
mod providers;
mod shutdown;

// Re-export public API
pub use init::{build_app, run, serve};
pub use loader::{apply_port_override, load_config, DEFAULT_CONFIG};
pub use providers::{relay_state, resolve_generation_provider};
