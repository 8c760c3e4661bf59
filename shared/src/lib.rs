//! Shared types for the Tandoor platform
//!
//! Common types used by the server and clients: error codes and the
//! unified API response envelope, domain models (restaurants, menu,
//! orders), realtime broadcast events, and small utilities.

pub mod error;
pub mod event;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use event::BroadcastEvent;
