//! Postgres-backed catalog store.
//!
//! One concrete store struct owns the pool; per-entity operations live in
//! sibling modules (`products`, `tags`, `categories`). All queries are
//! runtime-checked `sqlx::query` calls with explicit binds.

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use shopfront_catalog::{Category, Product, Tag};
use shopfront_core::{CategoryId, ProductId, TagId};

use crate::error::StoreResult;

mod categories;
mod products;
mod tags;

/// Schema DDL, applied idempotently at startup.
const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Data-access context for the catalog.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogStore {
    pool: PgPool,
}

impl CatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to Postgres and build a store around a small pool.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the schema. Every statement is `IF NOT EXISTS`, so this is safe
    /// to run on every startup.
    pub async fn apply_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::info!("catalog schema applied");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// -------------------------
// Row mapping helpers
// -------------------------

pub(crate) fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_i64(row.try_get("id")?),
        product_name: row.try_get("product_name")?,
        price_cents: row.try_get("price_cents")?,
        stock: row.try_get("stock")?,
        category_id: row
            .try_get::<Option<i64>, _>("category_id")?
            .map(CategoryId::from_i64),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn tag_from_row(row: &PgRow) -> Result<Tag, sqlx::Error> {
    Ok(Tag {
        id: TagId::from_i64(row.try_get("id")?),
        tag_name: row.try_get("tag_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: CategoryId::from_i64(row.try_get("id")?),
        category_name: row.try_get("category_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Category columns joined alongside product columns (aliased `category_*`
/// to dodge the name clash with the product's own timestamps).
pub(crate) fn joined_category_from_row(row: &PgRow) -> Result<Option<Category>, sqlx::Error> {
    let id: Option<i64> = row.try_get("category_id")?;
    match id {
        None => Ok(None),
        Some(id) => Ok(Some(Category {
            id: CategoryId::from_i64(id),
            category_name: row.try_get("category_name")?,
            created_at: row.try_get("category_created_at")?,
            updated_at: row.try_get("category_updated_at")?,
        })),
    }
}
