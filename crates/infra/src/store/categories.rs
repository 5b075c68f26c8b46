//! Category operations. Reads eagerly load each category's products.

use std::collections::HashMap;

use sqlx::Row;

use shopfront_catalog::{Category, CategoryRecord, NewCategory, Product};
use shopfront_core::CategoryId;

use crate::error::StoreResult;
use crate::store::{category_from_row, product_from_row, CatalogStore};

impl CatalogStore {
    pub async fn categories_list(&self) -> StoreResult<Vec<CategoryRecord>> {
        let rows = sqlx::query(
            "SELECT id, category_name, created_at, updated_at FROM categories ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(CategoryRecord {
                category: category_from_row(row)?,
                products: Vec::new(),
            });
        }

        let product_rows = sqlx::query(
            r#"
            SELECT id, product_name, price_cents, stock, category_id, created_at, updated_at
            FROM products
            WHERE category_id IS NOT NULL
            ORDER BY category_id, id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
        for row in &product_rows {
            let category_id: Option<i64> = row.try_get("category_id")?;
            if let Some(category_id) = category_id {
                by_category
                    .entry(category_id)
                    .or_default()
                    .push(product_from_row(row)?);
            }
        }
        for record in &mut records {
            if let Some(products) = by_category.remove(&record.category.id.as_i64()) {
                record.products = products;
            }
        }

        Ok(records)
    }

    pub async fn categories_get(&self, id: CategoryId) -> StoreResult<Option<CategoryRecord>> {
        let Some(row) = sqlx::query(
            "SELECT id, category_name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool())
        .await?
        else {
            return Ok(None);
        };
        let category = category_from_row(&row)?;

        let product_rows = sqlx::query(
            r#"
            SELECT id, product_name, price_cents, stock, category_id, created_at, updated_at
            FROM products
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(self.pool())
        .await?;

        let mut products = Vec::with_capacity(product_rows.len());
        for row in &product_rows {
            products.push(product_from_row(row)?);
        }

        Ok(Some(CategoryRecord { category, products }))
    }

    pub async fn categories_create(&self, new: &NewCategory) -> StoreResult<Category> {
        new.validate()?;
        let row = sqlx::query(
            r#"
            INSERT INTO categories (category_name)
            VALUES ($1)
            RETURNING id, category_name, created_at, updated_at
            "#,
        )
        .bind(&new.category_name)
        .fetch_one(self.pool())
        .await?;
        let category = category_from_row(&row)?;
        tracing::info!(category_id = category.id.as_i64(), "category created");
        Ok(category)
    }

    pub async fn categories_rename(&self, id: CategoryId, new: &NewCategory) -> StoreResult<bool> {
        new.validate()?;
        let result =
            sqlx::query("UPDATE categories SET category_name = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i64())
                .bind(&new.category_name)
                .execute(self.pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a category. Products referencing it keep existing with their
    /// `category_id` nulled out (`ON DELETE SET NULL`).
    pub async fn categories_delete(&self, id: CategoryId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
