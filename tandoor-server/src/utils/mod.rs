//! Shared helpers: logging setup and business-timezone date math.

pub mod logger;
pub mod time;
