//! Realtime broadcast events
//!
//! Every mutation that connected clients care about is announced as one of
//! these variants. Each carries a full entity snapshot, never a delta, so a
//! client that just connected can render the event without a baseline fetch.
//!
//! Wire format (one JSON text frame per event):
//! `{"type": "NEW_ORDER", "data": { ...order... }}`

use crate::models::{Order, Restaurant};
use serde::{Deserialize, Serialize};

/// Closed set of events fanned out by the broadcast hub
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastEvent {
    /// A new order was placed
    NewOrder(Order),
    /// An order moved to a new status
    OrderStatusUpdate(Order),
    /// A tenant's subscription fields changed
    SubscriptionUpdate(Restaurant),
}

impl BroadcastEvent {
    /// Wire tag of this event (for logging)
    pub fn event_type(&self) -> &'static str {
        match self {
            BroadcastEvent::NewOrder(_) => "NEW_ORDER",
            BroadcastEvent::OrderStatusUpdate(_) => "ORDER_STATUS_UPDATE",
            BroadcastEvent::SubscriptionUpdate(_) => "SUBSCRIPTION_UPDATE",
        }
    }
}

impl std::fmt::Display for BroadcastEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, OrderStatus, OrderType};

    fn sample_order() -> Order {
        Order {
            id: "o-1".into(),
            tenant_id: "r-1".into(),
            order_number: "ORD-1700000000000-17".into(),
            order_type: OrderType::Takeaway,
            table_number: None,
            status: OrderStatus::Pending,
            items: vec![],
            subtotal: "0".into(),
            service_charge_amount: "0".into(),
            tax_amount: "0".into(),
            total: "0".into(),
            customer_name: None,
            customer_phone: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn envelope_has_type_and_data() {
        let event = BroadcastEvent::NewOrder(sample_order());
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(json["type"], "NEW_ORDER");
        assert_eq!(json["data"]["order_number"], "ORD-1700000000000-17");
    }

    #[test]
    fn event_type_matches_wire_tag() {
        let event = BroadcastEvent::OrderStatusUpdate(sample_order());
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(json["type"], event.event_type());
    }
}
