//! Order lifecycle
//!
//! Creation (access gate, validation, totals, receipt number) and the
//! status state machine. Every successful mutation broadcasts a full
//! order snapshot through the hub.

pub mod money;

use shared::models::{Order, OrderCreate, OrderStatus, OrderType};
use shared::util::{generate_order_number, now_millis};
use shared::{AppError, AppResult, BroadcastEvent, ErrorCode};
use uuid::Uuid;

use crate::db::{Storage, StorageError};
use crate::live::BroadcastHub;
use crate::subscription::SubscriptionService;

/// Attempts before giving up on a colliding receipt number
const ORDER_NUMBER_RETRIES: u32 = 8;

/// Order creation and state-machine transitions
#[derive(Clone)]
pub struct OrderManager {
    storage: Storage,
    hub: BroadcastHub,
    gate: SubscriptionService,
}

impl OrderManager {
    pub fn new(storage: Storage, hub: BroadcastHub, gate: SubscriptionService) -> Self {
        Self { storage, hub, gate }
    }

    /// Place a new order.
    ///
    /// The tenant must pass the subscription gate. Totals are computed
    /// from the tenant's current rates and frozen into the order; later
    /// rate changes never touch existing orders. Emits `NEW_ORDER` on
    /// success.
    pub fn create(&self, req: OrderCreate) -> AppResult<Order> {
        let restaurant = self.gate.ensure_access(&req.tenant_id)?;

        if req.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let table_number = req
            .table_number
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if matches!(req.order_type, OrderType::DineIn) && table_number.is_none() {
            return Err(AppError::new(ErrorCode::TableRequired));
        }

        let totals = money::compute_totals(
            &req.items,
            &restaurant.service_charge,
            &restaurant.tax_rate,
        )?;

        let now = now_millis();
        let mut order = Order {
            id: Uuid::new_v4().to_string(),
            tenant_id: req.tenant_id,
            order_number: generate_order_number(),
            order_type: req.order_type,
            table_number,
            status: OrderStatus::Pending,
            items: totals.items,
            subtotal: totals.subtotal,
            service_charge_amount: totals.service_charge_amount,
            tax_amount: totals.tax_amount,
            total: totals.total,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };

        for attempt in 1..=ORDER_NUMBER_RETRIES {
            match self.storage.insert_order(&order) {
                Ok(()) => {
                    tracing::info!(
                        order_id = %order.id,
                        order_number = %order.order_number,
                        tenant_id = %order.tenant_id,
                        total = %order.total,
                        "Order created"
                    );
                    self.hub.publish(&BroadcastEvent::NewOrder(order.clone()));
                    return Ok(order);
                }
                Err(StorageError::NumberTaken(number)) => {
                    tracing::warn!(
                        number = %number,
                        attempt,
                        "Order number collision, regenerating"
                    );
                    order.order_number = generate_order_number();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::internal("Could not allocate a unique order number"))
    }

    /// Move an order to a new status.
    ///
    /// Validation runs twice: once here against the freshest read for a
    /// clean error, and again inside the storage write transaction so a
    /// racing transition surfaces as `TransitionConflict` instead of
    /// silently overwriting. Emits `ORDER_STATUS_UPDATE` on success.
    pub fn transition(&self, order_id: &str, new_status: OrderStatus) -> AppResult<Order> {
        let current = self
            .storage
            .get_order(order_id)?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", order_id))?;

        if !current.status.can_transition_to(new_status) {
            return Err(AppError::invalid_transition(
                current.status.as_str(),
                new_status.as_str(),
            ));
        }

        let updated =
            self.storage
                .transition_order(order_id, current.status, new_status, now_millis())?;

        tracing::info!(
            order_id = %updated.id,
            from = current.status.as_str(),
            to = new_status.as_str(),
            "Order status updated"
        );
        self.hub
            .publish(&BroadcastEvent::OrderStatusUpdate(updated.clone()));
        Ok(updated)
    }

    /// Look up an order by its receipt number (opaque key)
    pub fn get_by_number(&self, order_number: &str) -> AppResult<Order> {
        self.storage.get_order_by_number(order_number)?.ok_or_else(|| {
            AppError::new(ErrorCode::OrderNotFound).with_detail("order_number", order_number)
        })
    }

    /// A tenant's orders, newest first, optionally filtered by status
    pub fn list(&self, tenant_id: &str, status: Option<OrderStatus>) -> AppResult<Vec<Order>> {
        Ok(self.storage.list_orders(tenant_id, status)?)
    }
}
