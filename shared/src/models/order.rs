//! Order Model

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The happy path is strictly forward: PENDING -> PREPARING -> READY ->
/// COMPLETED. CANCELLED is reachable from any non-terminal status.
/// COMPLETED and CANCELLED are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order can move from `self` to `next`.
    ///
    /// Re-submitting the current status is rejected: the table only
    /// contains forward edges, so (PENDING, PENDING) and friends are
    /// invalid transitions rather than no-ops.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Preparing) | (Preparing, Ready) | (Ready, Completed) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// How the order is fulfilled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::Takeaway => "takeaway",
        }
    }
}

/// Order line item.
///
/// `name` and `price` are snapshots taken when the order was placed;
/// later menu edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    /// Unit price as a decimal string
    pub price: String,
    pub quantity: i32,
    /// Line total (price x quantity) as a decimal string
    pub total: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    /// Human-facing receipt number, e.g. "ORD-1714988112345-273".
    /// Opaque to clients; lookups must treat it as a whole string.
    pub order_number: String,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Sum of line totals, decimal string
    pub subtotal: String,
    /// Service charge amount (not rate), decimal string
    pub service_charge_amount: String,
    /// Tax amount (not rate), decimal string
    pub tax_amount: String,
    /// subtotal + service charge + tax, decimal string
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Line item as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub item_id: String,
    pub name: String,
    /// Unit price as a decimal string
    pub price: String,
    pub quantity: i32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub tenant_id: String,
    pub order_type: OrderType,
    pub table_number: Option<String>,
    pub items: Vec<OrderItemInput>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdateStatus {
    pub status: OrderStatus,
}
