//! redb-backed storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `restaurants` | `id` | `Restaurant` (JSON) | Tenant records |
//! | `menu_categories` | `id` | `MenuCategory` (JSON) | Menu sections |
//! | `menu_items` | `id` | `MenuItem` (JSON) | Catalog entries |
//! | `orders` | `id` | `Order` (JSON) | Order documents |
//! | `order_numbers` | `order_number` | `id` | Unique receipt-number index |
//!
//! Values are JSON-serialized via serde_json. Every composite operation
//! (insert + index maintenance, validate + apply) runs inside a single
//! write transaction. redb serializes writers, so an open write
//! transaction always observes the latest committed state; the
//! transition guard in [`Storage::transition_order`] relies on this.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once `commit()`
//! returns, the change survives power loss and the file stays in a
//! consistent state (copy-on-write with atomic pointer swap).

use redb::{Database, TableDefinition};
use shared::AppError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

mod menu;
mod orders;
mod restaurants;

#[cfg(test)]
pub(crate) use orders::tests::sample_order;
#[cfg(test)]
pub(crate) use restaurants::tests::sample_restaurant;

/// Tenant records: key = restaurant id, value = JSON-serialized Restaurant
const RESTAURANTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("restaurants");

/// Menu sections: key = category id, value = JSON-serialized MenuCategory
const MENU_CATEGORIES_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("menu_categories");

/// Catalog entries: key = item id, value = JSON-serialized MenuItem
const MENU_ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("menu_items");

/// Order documents: key = order id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Unique receipt-number index: key = order_number, value = order id.
/// Insert-if-absent on this table is what makes order numbers unique.
const ORDER_NUMBERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("order_numbers");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Restaurant slug already taken: {0}")]
    SlugTaken(String),

    #[error("Order number already taken: {0}")]
    NumberTaken(String),

    #[error("Order status is {current}, caller validated against {expected}")]
    TransitionConflict { current: String, expected: String },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        use shared::ErrorCode;

        match err {
            StorageError::RestaurantNotFound(id) => {
                AppError::new(ErrorCode::TenantNotFound).with_detail("id", id)
            }
            StorageError::CategoryNotFound(id) => {
                AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id)
            }
            StorageError::MenuItemNotFound(id) => {
                AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
            }
            StorageError::OrderNotFound(key) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("key", key)
            }
            StorageError::SlugTaken(slug) => {
                AppError::already_exists(format!("Restaurant with slug '{}'", slug))
            }
            // Escapes only if the generator exhausted its retries.
            StorageError::NumberTaken(number) => {
                AppError::internal(format!("Could not allocate order number {}", number))
            }
            StorageError::TransitionConflict { current, expected } => {
                AppError::conflict(format!(
                    "Order status moved to {} while the request validated against {}",
                    current, expected
                ))
                .with_detail("current", current)
                .with_detail("expected", expected)
            }
            StorageError::InvalidTransition { from, to } => AppError::invalid_transition(from, to),
            other => AppError::database(other.to_string()),
        }
    }
}

/// Embedded store holding all platform tables
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path.
    ///
    /// All tables are created up front so later read transactions never
    /// hit `TableDoesNotExist` on a fresh file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RESTAURANTS_TABLE)?;
            let _ = write_txn.open_table(MENU_CATEGORIES_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_NUMBERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RESTAURANTS_TABLE)?;
            let _ = write_txn.open_table(MENU_CATEGORIES_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_NUMBERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}
