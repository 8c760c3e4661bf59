//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`restaurants`] - tenant onboarding, subscription admin, tenant-scoped reads
//! - [`menu_items`] - catalog mutations (subscription-gated)
//! - [`orders`] - order placement, status transitions, receipt lookup
//! - [`ws`] - realtime event stream
//!
//! Every handler returns `AppResult<Json<T>>`; errors render through
//! `AppError: IntoResponse` with the platform error envelope.

pub mod health;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod ws;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(restaurants::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .route("/ws", get(ws::handle_ws))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
