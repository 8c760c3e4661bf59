//! Core module: configuration, shared state, server entry
//!
//! - [`Config`] - server configuration
//! - [`AppState`] - shared service handles
//! - [`server::run`] - HTTP server loop

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use state::AppState;
