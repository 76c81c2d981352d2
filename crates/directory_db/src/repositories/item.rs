//! Item repository
//!
//! Persistence side of the item-update form: items have a name, a price,
//! and a quantity. Updates arrive pre-validated from the API layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use directory_core::ItemId;

use crate::error::DatabaseError;

const ITEM_COLUMNS: &str = "item_id, name, price, quantity, created_at, updated_at";

/// Repository for item rows
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an item and returns the stored row
    pub async fn insert(&self, item: NewItem) -> Result<ItemRow, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "INSERT INTO items (name, price, quantity) VALUES ($1, $2, $3) \
             RETURNING item_id, name, price, quantity, created_at, updated_at",
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Fetches an item by id, `None` if it does not exist
    pub async fn find_by_id(&self, id: ItemId) -> Result<Option<ItemRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Applies validated form changes to an item
    ///
    /// Returns the number of rows updated: zero means the item is gone.
    pub async fn update(&self, id: ItemId, changes: ItemChanges) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE items SET name = $2, price = $3, quantity = $4, updated_at = now() \
             WHERE item_id = $1",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.price)
        .bind(changes.quantity)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Database row for an item
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

/// Validated changes applied by an item update
#[derive(Debug, Clone)]
pub struct ItemChanges {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}
