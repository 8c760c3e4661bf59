//! Menu item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::now_millis;
use shared::{AppError, AppResult};
use uuid::Uuid;

use crate::core::AppState;
use crate::orders::money;

const DEFAULT_PREPARATION_TIME: u32 = 15;

/// POST /api/menu-items - add a catalog entry.
///
/// The owning tenant must pass the subscription gate; the category must
/// already exist.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    state.subscription.ensure_access(&payload.restaurant_id)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Menu item name is required"));
    }
    let price = money::format_money(money::parse_price(&payload.price)?);

    let item = MenuItem {
        id: Uuid::new_v4().to_string(),
        restaurant_id: payload.restaurant_id,
        category_id: payload.category_id,
        name,
        description: payload.description,
        price,
        image_url: payload.image_url,
        is_veg: payload.is_veg.unwrap_or(false),
        is_popular: payload.is_popular.unwrap_or(false),
        is_available: true,
        preparation_time: payload.preparation_time.unwrap_or(DEFAULT_PREPARATION_TIME),
        display_order: payload.display_order.unwrap_or(0),
        created_at: now_millis(),
    };
    state.storage.insert_menu_item(&item)?;

    tracing::info!(
        item_id = %item.id,
        restaurant_id = %item.restaurant_id,
        name = %item.name,
        "Menu item created"
    );
    Ok(Json(item))
}

/// PATCH /api/menu-items/{id} - sparse field update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let existing = state
        .storage
        .get_menu_item(&id)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    state.subscription.ensure_access(&existing.restaurant_id)?;

    let price = payload
        .price
        .map(|v| money::parse_price(&v).map(money::format_money))
        .transpose()?;

    let updated = state.storage.update_menu_item(&id, |item| {
        if let Some(category_id) = payload.category_id {
            item.category_id = category_id;
        }
        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(image_url) = payload.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(is_veg) = payload.is_veg {
            item.is_veg = is_veg;
        }
        if let Some(is_popular) = payload.is_popular {
            item.is_popular = is_popular;
        }
        if let Some(is_available) = payload.is_available {
            item.is_available = is_available;
        }
        if let Some(preparation_time) = payload.preparation_time {
            item.preparation_time = preparation_time;
        }
        if let Some(display_order) = payload.display_order {
            item.display_order = display_order;
        }
    })?;

    Ok(Json(updated))
}

/// DELETE /api/menu-items/{id} - soft delete.
///
/// Flips `is_available` off so the item disappears from listings while
/// existing order snapshots keep pointing at a real record.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let existing = state
        .storage
        .get_menu_item(&id)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    state.subscription.ensure_access(&existing.restaurant_id)?;

    let updated = state
        .storage
        .update_menu_item(&id, |item| item.is_available = false)?;

    tracing::info!(item_id = %id, "Menu item soft-deleted");
    Ok(Json(updated))
}
