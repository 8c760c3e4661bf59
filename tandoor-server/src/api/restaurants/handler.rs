//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuItem, Order, OrderStatus, OrderType, PlanType,
    Restaurant, RestaurantCreate, RestaurantUpdate, SubscriptionAction, UpgradeRequest,
};
use shared::util::now_millis;
use shared::{AppError, AppResult};
use uuid::Uuid;

use crate::core::AppState;
use crate::orders::money;
use crate::stats::DailyStats;

const DEFAULT_PRIMARY_COLOR: &str = "#FF6B35";
const DEFAULT_SECONDARY_COLOR: &str = "#C62828";
const DEFAULT_ACCENT_COLOR: &str = "#FFB300";
const DEFAULT_TABLE_COUNT: u32 = 15;
const DEFAULT_SERVICE_CHARGE: &str = "10.00";
const DEFAULT_TAX_RATE: &str = "5.00";
const DEFAULT_MONTHLY_RATE: &str = "4999.00";

/// Validate a percent field and normalize it to two fraction digits
fn normalize_percent(value: &str, field: &str) -> AppResult<String> {
    let rate = money::parse_percent(value, field)?;
    Ok(money::format_money(rate))
}

/// GET /api/restaurants - list all tenants, newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = state.storage.list_restaurants()?;
    Ok(Json(restaurants))
}

/// POST /api/restaurants - onboard a new tenant.
///
/// The trial starts now with no end date; `extend_trial` or `activate`
/// set the window later. Billing rates fall back to the platform
/// defaults when the payload leaves them out.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Restaurant name is required"));
    }
    let slug = payload.slug.trim().to_lowercase();
    if slug.is_empty() {
        return Err(AppError::validation("Restaurant slug is required"));
    }

    let service_charge = match payload.service_charge {
        Some(v) => normalize_percent(&v, "service_charge")?,
        None => DEFAULT_SERVICE_CHARGE.to_string(),
    };
    let tax_rate = match payload.tax_rate {
        Some(v) => normalize_percent(&v, "tax_rate")?,
        None => DEFAULT_TAX_RATE.to_string(),
    };

    let now = now_millis();
    let restaurant = Restaurant {
        id: Uuid::new_v4().to_string(),
        name,
        slug,
        description: payload.description,
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
        logo_url: payload.logo_url,
        primary_color: payload
            .primary_color
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string()),
        secondary_color: payload
            .secondary_color
            .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string()),
        accent_color: payload
            .accent_color
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()),
        table_count: payload.table_count.unwrap_or(DEFAULT_TABLE_COUNT),
        service_charge,
        tax_rate,
        order_modes: vec![OrderType::DineIn, OrderType::Takeaway],
        is_active: true,
        trial_start: now,
        subscription_end: None,
        plan_type: PlanType::Trial,
        monthly_rate: DEFAULT_MONTHLY_RATE.to_string(),
        created_at: now,
        updated_at: now,
    };

    state.storage.insert_restaurant(&restaurant)?;
    tracing::info!(
        restaurant_id = %restaurant.id,
        slug = %restaurant.slug,
        "Restaurant onboarded"
    );
    Ok(Json(restaurant))
}

/// GET /api/restaurants/{id} - fetch one tenant
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state
        .storage
        .get_restaurant(&id)?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    Ok(Json(restaurant))
}

/// PATCH /api/restaurants/{id} - sparse profile/billing update.
///
/// Subscription fields are not reachable from here; those go through
/// the subscription and upgrade endpoints.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    let service_charge = payload
        .service_charge
        .map(|v| normalize_percent(&v, "service_charge"))
        .transpose()?;
    let tax_rate = payload
        .tax_rate
        .map(|v| normalize_percent(&v, "tax_rate"))
        .transpose()?;

    let updated = state.storage.update_restaurant(&id, |r| {
        if let Some(name) = payload.name {
            r.name = name;
        }
        if let Some(description) = payload.description {
            r.description = Some(description);
        }
        if let Some(address) = payload.address {
            r.address = Some(address);
        }
        if let Some(phone) = payload.phone {
            r.phone = Some(phone);
        }
        if let Some(email) = payload.email {
            r.email = Some(email);
        }
        if let Some(logo_url) = payload.logo_url {
            r.logo_url = Some(logo_url);
        }
        if let Some(primary_color) = payload.primary_color {
            r.primary_color = primary_color;
        }
        if let Some(secondary_color) = payload.secondary_color {
            r.secondary_color = secondary_color;
        }
        if let Some(accent_color) = payload.accent_color {
            r.accent_color = accent_color;
        }
        if let Some(table_count) = payload.table_count {
            r.table_count = table_count;
        }
        if let Some(service_charge) = service_charge {
            r.service_charge = service_charge;
        }
        if let Some(tax_rate) = tax_rate {
            r.tax_rate = tax_rate;
        }
        r.updated_at = now_millis();
    })?;

    Ok(Json(updated))
}

/// POST /api/restaurants/{id}/upgrade - switch plan, grant one month
pub async fn upgrade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpgradeRequest>,
) -> AppResult<Json<Restaurant>> {
    let updated = state.subscription.upgrade(&id, payload.plan_type)?;
    Ok(Json(updated))
}

/// POST /api/restaurants/{id}/subscription - admin action
pub async fn apply_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(action): Json<SubscriptionAction>,
) -> AppResult<Json<Restaurant>> {
    let updated = state.subscription.apply(&id, action)?;
    Ok(Json(updated))
}

/// GET /api/restaurants/{id}/categories - menu sections in display order
pub async fn list_categories(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = state.storage.list_categories(&id)?;
    Ok(Json(categories))
}

/// POST /api/restaurants/{id}/categories - create a menu section
pub async fn create_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Category name is required"));
    }

    let category = MenuCategory {
        id: Uuid::new_v4().to_string(),
        restaurant_id: id,
        name,
        display_order: payload.display_order.unwrap_or(0),
        created_at: now_millis(),
    };
    state.storage.insert_category(&category)?;
    Ok(Json(category))
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// GET /api/restaurants/{id}/menu - available items, customer-facing
pub async fn list_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state
        .storage
        .list_menu_items(&id, query.category.as_deref())?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
}

/// GET /api/restaurants/{id}/orders - order history, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list(&id, query.status)?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    3
}

/// GET /api/restaurants/{id}/stats - today's dashboard aggregates
pub async fn daily_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<DailyStats>> {
    let today = Utc::now().with_timezone(&state.config.timezone).date_naive();
    let stats = state.stats.daily_stats(&id, today, query.top)?;
    Ok(Json(stats))
}
