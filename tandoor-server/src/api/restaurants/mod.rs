//! Restaurant (tenant) API module
//!
//! Onboarding, profile updates, subscription administration, and the
//! tenant-scoped read endpoints (categories, menu, orders, stats).

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .route("/{id}/upgrade", post(handler::upgrade))
        .route("/{id}/subscription", post(handler::apply_subscription))
        .route(
            "/{id}/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route("/{id}/menu", get(handler::list_menu))
        .route("/{id}/orders", get(handler::list_orders))
        .route("/{id}/stats", get(handler::daily_stats))
}
