//! Tandoor Server - multi-tenant restaurant ordering platform core
//!
//! # Architecture
//!
//! - **Orders** (`orders`): creation, money math, and the status state machine
//! - **Realtime** (`live`): broadcast hub fanning events out to WebSocket clients
//! - **Subscriptions** (`subscription`): trial/paid access gate and admin actions
//! - **Stats** (`stats`): daily dashboard aggregates
//! - **Storage** (`db`): embedded redb store
//! - **HTTP API** (`api`): axum routes and handlers
//!
//! # Module structure
//!
//! ```text
//! tandoor-server/src/
//! ├── core/          # config, shared state, server loop
//! ├── db/            # redb tables and operations
//! ├── orders/        # order lifecycle + money
//! ├── subscription/  # access gate
//! ├── stats/         # daily aggregates
//! ├── live/          # broadcast hub
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logger, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod live;
pub mod orders;
pub mod stats;
pub mod subscription;
pub mod utils;

// Re-export common types
pub use core::{AppState, Config};
pub use db::Storage;
pub use live::BroadcastHub;
pub use orders::OrderManager;
pub use stats::StatsService;
pub use subscription::{SubscriptionService, SubscriptionStatus};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
