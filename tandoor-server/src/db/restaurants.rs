//! Restaurant (tenant) table operations

use redb::{ReadableDatabase, ReadableTable};
use shared::models::Restaurant;

use super::{RESTAURANTS_TABLE, Storage, StorageError, StorageResult};

impl Storage {
    /// Insert a new restaurant.
    ///
    /// The slug is checked for uniqueness inside the same write
    /// transaction, so two concurrent onboardings with the same slug
    /// cannot both succeed.
    pub fn insert_restaurant(&self, restaurant: &Restaurant) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;

            for entry in table.iter()? {
                let (_key, value) = entry?;
                let existing: Restaurant = serde_json::from_slice(value.value())?;
                if existing.slug == restaurant.slug {
                    return Err(StorageError::SlugTaken(restaurant.slug.clone()));
                }
            }

            let value = serde_json::to_vec(restaurant)?;
            table.insert(restaurant.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a restaurant by id
    pub fn get_restaurant(&self, id: &str) -> StorageResult<Option<Restaurant>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let restaurant: Restaurant = serde_json::from_slice(value.value())?;
                Ok(Some(restaurant))
            }
            None => Ok(None),
        }
    }

    /// List all restaurants, newest first
    pub fn list_restaurants(&self) -> StorageResult<Vec<Restaurant>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESTAURANTS_TABLE)?;

        let mut restaurants = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            let restaurant: Restaurant = serde_json::from_slice(value.value())?;
            restaurants.push(restaurant);
        }

        restaurants.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(restaurants)
    }

    /// Read-modify-write a restaurant inside one write transaction.
    ///
    /// Returns the updated record. `RestaurantNotFound` if the id is
    /// unknown.
    pub fn update_restaurant<F>(&self, id: &str, apply: F) -> StorageResult<Restaurant>
    where
        F: FnOnce(&mut Restaurant),
    {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(RESTAURANTS_TABLE)?;

            let mut restaurant: Restaurant = match table.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::RestaurantNotFound(id.to_string())),
            };

            apply(&mut restaurant);

            let value = serde_json::to_vec(&restaurant)?;
            table.insert(id, value.as_slice())?;
            restaurant
        };
        txn.commit()?;
        Ok(updated)
    }
}
