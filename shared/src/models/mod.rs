//! Data models
//!
//! Shared between tandoor-server and frontend (via API).
//! All IDs are UUID strings; timestamps are Unix milliseconds (UTC);
//! monetary amounts are decimal strings with two fraction digits.

pub mod menu;
pub mod order;
pub mod restaurant;

// Re-exports
pub use menu::*;
pub use order::*;
pub use restaurant::*;
