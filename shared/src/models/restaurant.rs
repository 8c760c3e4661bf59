//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::order::OrderType;

/// Subscription plan recorded on the restaurant row.
///
/// This is what the tenant *pays for*, not whether they currently have
/// access. Effective access is derived from `is_active`, `plan_type`
/// and `subscription_end` at check time and never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    #[default]
    Trial,
    Premium,
    Expired,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Trial => "trial",
            PlanType::Premium => "premium",
            PlanType::Expired => "expired",
        }
    }
}

/// Restaurant entity (one row per tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// URL-safe identifier used by customer-facing menu pages
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub table_count: u32,
    /// Service charge percentage as a decimal string, e.g. "10.00"
    pub service_charge: String,
    /// Tax percentage as a decimal string, e.g. "5.00"
    pub tax_rate: String,
    pub order_modes: Vec<OrderType>,
    pub is_active: bool,
    /// Unix ms when the trial started
    pub trial_start: i64,
    /// Unix ms when paid/trial access ends; `None` until first granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_end: Option<i64>,
    pub plan_type: PlanType,
    /// Monthly rate as a decimal string, e.g. "4999.00"
    pub monthly_rate: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub table_count: Option<u32>,
    pub service_charge: Option<String>,
    pub tax_rate: Option<String>,
}

/// Update restaurant payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub table_count: Option<u32>,
    pub service_charge: Option<String>,
    pub tax_rate: Option<String>,
}

/// Subscription admin action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum SubscriptionAction {
    /// Mark the tenant paid for a full year
    Activate,
    /// Cut off access immediately, keeping the paid-until date
    Suspend,
    /// Grant a fresh 30-day trial window
    ExtendTrial,
    /// Force the trial into the expired state
    ExpireTrial,
}

/// Plan upgrade payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRequest {
    pub plan_type: PlanType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_type_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&PlanType::Trial).unwrap(), "\"trial\"");
        assert_eq!(
            serde_json::to_string(&PlanType::Premium).unwrap(),
            "\"premium\""
        );
        assert_eq!(
            serde_json::to_string(&PlanType::Expired).unwrap(),
            "\"expired\""
        );
    }

    #[test]
    fn subscription_action_parses_tagged_form() {
        let action: SubscriptionAction =
            serde_json::from_str(r#"{"action":"extend_trial"}"#).unwrap();
        assert!(matches!(action, SubscriptionAction::ExtendTrial));
    }

    #[test]
    fn restaurant_omits_unset_optionals() {
        let restaurant = Restaurant {
            id: "r1".into(),
            name: "Spice Route".into(),
            slug: "spice-route".into(),
            description: None,
            address: None,
            phone: None,
            email: None,
            logo_url: None,
            primary_color: "#FF6B35".into(),
            secondary_color: "#C62828".into(),
            accent_color: "#FFB300".into(),
            table_count: 15,
            service_charge: "10.00".into(),
            tax_rate: "5.00".into(),
            order_modes: vec![OrderType::DineIn, OrderType::Takeaway],
            is_active: true,
            trial_start: 1_700_000_000_000,
            subscription_end: None,
            plan_type: PlanType::Trial,
            monthly_rate: "4999.00".into(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&restaurant).unwrap();
        assert!(json.get("subscription_end").is_none());
        assert!(json.get("description").is_none());
        assert_eq!(json["plan_type"], "trial");
        assert_eq!(json["order_modes"][0], "dine-in");
    }
}
