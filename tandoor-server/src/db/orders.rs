//! Order table operations: documents, receipt-number index, atomic
//! status transitions.

use redb::{ReadableDatabase, ReadableTable};
use shared::models::{Order, OrderStatus};

use super::{ORDER_NUMBERS_TABLE, ORDERS_TABLE, Storage, StorageError, StorageResult};

impl Storage {
    /// Insert a new order and claim its receipt number.
    ///
    /// Both writes happen in one transaction: if the number is already
    /// claimed the insert fails with `NumberTaken` and nothing is
    /// written, letting the caller retry with a fresh suffix.
    pub fn insert_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
            if numbers.get(order.order_number.as_str())?.is_some() {
                return Err(StorageError::NumberTaken(order.order_number.clone()));
            }
            numbers.insert(order.order_number.as_str(), order.id.as_str())?;

            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            orders.insert(order.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get an order by id
    pub fn get_order(&self, id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let order: Order = serde_json::from_slice(value.value())?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Get an order by its receipt number.
    ///
    /// The number is an opaque key: exact match through the index, no
    /// parsing of the embedded timestamp.
    pub fn get_order_by_number(&self, order_number: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let numbers = read_txn.open_table(ORDER_NUMBERS_TABLE)?;

        let order_id = match numbers.get(order_number)? {
            Some(value) => value.value().to_string(),
            None => return Ok(None),
        };

        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(order_id.as_str())? {
            Some(value) => {
                let order: Order = serde_json::from_slice(value.value())?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// List a tenant's orders, newest first, optionally filtered by status
    pub fn list_orders(
        &self,
        tenant_id: &str,
        status: Option<OrderStatus>,
    ) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.tenant_id != tenant_id {
                continue;
            }
            if let Some(wanted) = status
                && order.status != wanted
            {
                continue;
            }
            orders.push(order);
        }

        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(orders)
    }

    /// Orders a tenant created in `[start_ms, end_ms)`, oldest first.
    ///
    /// The ascending order is what "first seen" means for popularity
    /// tie-breaking downstream.
    pub fn orders_created_between(
        &self,
        tenant_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.tenant_id == tenant_id
                && order.created_at >= start_ms
                && order.created_at < end_ms
            {
                orders.push(order);
            }
        }

        orders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(orders)
    }

    /// Validate-and-apply a status transition in one write transaction.
    ///
    /// The order is re-read inside the transaction, so validation always
    /// runs against the latest committed status, never against whatever
    /// snapshot the caller was holding. `expected` is the status the
    /// caller validated against: if the stored status has moved on since
    /// that read, the caller lost a race and gets `TransitionConflict`
    /// instead of silently overwriting someone else's transition.
    pub fn transition_order(
        &self,
        id: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
        now_ms: i64,
    ) -> StorageResult<Order> {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE)?;

            let mut order: Order = match table.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::OrderNotFound(id.to_string())),
            };

            if order.status != expected {
                return Err(StorageError::TransitionConflict {
                    current: order.status.as_str().to_string(),
                    expected: expected.as_str().to_string(),
                });
            }

            if !order.status.can_transition_to(new_status) {
                return Err(StorageError::InvalidTransition {
                    from: order.status.as_str().to_string(),
                    to: new_status.as_str().to_string(),
                });
            }

            order.status = new_status;
            order.updated_at = now_ms;

            let value = serde_json::to_vec(&order)?;
            table.insert(id, value.as_slice())?;
            order
        };
        txn.commit()?;
        Ok(updated)
    }
}
