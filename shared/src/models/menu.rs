//! Menu Model

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub display_order: i32,
    pub created_at: i64,
}

/// Create category payload; the owning restaurant comes from the route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryCreate {
    pub name: String,
    pub display_order: Option<i32>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price as a decimal string, e.g. "249.00"
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_veg: bool,
    pub is_popular: bool,
    /// Soft-delete flag; unavailable items are hidden from listings
    pub is_available: bool,
    /// Kitchen prep estimate in minutes
    pub preparation_time: u32,
    pub display_order: i32,
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
    pub is_popular: Option<bool>,
    pub preparation_time: Option<u32>,
    pub display_order: Option<i32>,
}

/// Update menu item payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
    pub is_popular: Option<bool>,
    pub is_available: Option<bool>,
    pub preparation_time: Option<u32>,
    pub display_order: Option<i32>,
}
