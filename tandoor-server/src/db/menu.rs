//! Menu category and item table operations

use redb::{ReadableDatabase, ReadableTable};
use shared::models::{MenuCategory, MenuItem};

use super::{
    MENU_CATEGORIES_TABLE, MENU_ITEMS_TABLE, RESTAURANTS_TABLE, Storage, StorageError,
    StorageResult,
};

impl Storage {
    /// Insert a new category after checking the restaurant exists
    pub fn insert_category(&self, category: &MenuCategory) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let restaurants = txn.open_table(RESTAURANTS_TABLE)?;
            if restaurants.get(category.restaurant_id.as_str())?.is_none() {
                return Err(StorageError::RestaurantNotFound(
                    category.restaurant_id.clone(),
                ));
            }

            let mut table = txn.open_table(MENU_CATEGORIES_TABLE)?;
            let value = serde_json::to_vec(category)?;
            table.insert(category.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// List a restaurant's categories ordered by display_order
    pub fn list_categories(&self, restaurant_id: &str) -> StorageResult<Vec<MenuCategory>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_CATEGORIES_TABLE)?;

        let mut categories = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let category: MenuCategory = serde_json::from_slice(value.value())?;
            if category.restaurant_id == restaurant_id {
                categories.push(category);
            }
        }

        categories.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Insert a new menu item after checking restaurant and category exist
    pub fn insert_menu_item(&self, item: &MenuItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let restaurants = txn.open_table(RESTAURANTS_TABLE)?;
            if restaurants.get(item.restaurant_id.as_str())?.is_none() {
                return Err(StorageError::RestaurantNotFound(item.restaurant_id.clone()));
            }

            let categories = txn.open_table(MENU_CATEGORIES_TABLE)?;
            if categories.get(item.category_id.as_str())?.is_none() {
                return Err(StorageError::CategoryNotFound(item.category_id.clone()));
            }

            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            let value = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a menu item by id (soft-deleted items included)
    pub fn get_menu_item(&self, id: &str) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let item: MenuItem = serde_json::from_slice(value.value())?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// List a restaurant's available menu items, optionally scoped to one
    /// category, ordered by display_order.
    ///
    /// Soft-deleted items (`is_available = false`) are never returned
    /// here; they stay readable through [`Storage::get_menu_item`].
    pub fn list_menu_items(
        &self,
        restaurant_id: &str,
        category_id: Option<&str>,
    ) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let item: MenuItem = serde_json::from_slice(value.value())?;
            if item.restaurant_id != restaurant_id || !item.is_available {
                continue;
            }
            if let Some(cid) = category_id
                && item.category_id != cid
            {
                continue;
            }
            items.push(item);
        }

        items.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    /// Read-modify-write a menu item inside one write transaction.
    ///
    /// Soft delete goes through here too (flipping `is_available`).
    pub fn update_menu_item<F>(&self, id: &str, apply: F) -> StorageResult<MenuItem>
    where
        F: FnOnce(&mut MenuItem),
    {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;

            let mut item: MenuItem = match table.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::MenuItemNotFound(id.to_string())),
            };

            apply(&mut item);

            let value = serde_json::to_vec(&item)?;
            table.insert(id, value.as_slice())?;
            item
        };
        txn.commit()?;
        Ok(updated)
    }
}
