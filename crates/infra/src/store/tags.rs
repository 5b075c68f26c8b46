//! Tag operations. Reads eagerly load each tag's associated products.

use std::collections::HashMap;

use sqlx::Row;

use shopfront_catalog::{NewTag, Product, Tag, TagRecord};
use shopfront_core::TagId;

use crate::error::StoreResult;
use crate::store::{product_from_row, tag_from_row, CatalogStore};

impl CatalogStore {
    pub async fn tags_list(&self) -> StoreResult<Vec<TagRecord>> {
        let rows = sqlx::query("SELECT id, tag_name, created_at, updated_at FROM tags ORDER BY id")
            .fetch_all(self.pool())
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(TagRecord {
                tag: tag_from_row(row)?,
                products: Vec::new(),
            });
        }

        let product_rows = sqlx::query(
            r#"
            SELECT pt.tag_id, p.id, p.product_name, p.price_cents, p.stock,
                   p.category_id, p.created_at, p.updated_at
            FROM product_tags pt
            JOIN products p ON p.id = pt.product_id
            ORDER BY pt.tag_id, p.id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut by_tag: HashMap<i64, Vec<Product>> = HashMap::new();
        for row in &product_rows {
            by_tag
                .entry(row.try_get("tag_id")?)
                .or_default()
                .push(product_from_row(row)?);
        }
        for record in &mut records {
            if let Some(products) = by_tag.remove(&record.tag.id.as_i64()) {
                record.products = products;
            }
        }

        Ok(records)
    }

    pub async fn tags_get(&self, id: TagId) -> StoreResult<Option<TagRecord>> {
        let Some(row) =
            sqlx::query("SELECT id, tag_name, created_at, updated_at FROM tags WHERE id = $1")
                .bind(id.as_i64())
                .fetch_optional(self.pool())
                .await?
        else {
            return Ok(None);
        };
        let tag = tag_from_row(&row)?;

        let product_rows = sqlx::query(
            r#"
            SELECT p.id, p.product_name, p.price_cents, p.stock,
                   p.category_id, p.created_at, p.updated_at
            FROM product_tags pt
            JOIN products p ON p.id = pt.product_id
            WHERE pt.tag_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(self.pool())
        .await?;

        let mut products = Vec::with_capacity(product_rows.len());
        for row in &product_rows {
            products.push(product_from_row(row)?);
        }

        Ok(Some(TagRecord { tag, products }))
    }

    pub async fn tags_create(&self, new: &NewTag) -> StoreResult<Tag> {
        new.validate()?;
        let row = sqlx::query(
            r#"
            INSERT INTO tags (tag_name)
            VALUES ($1)
            RETURNING id, tag_name, created_at, updated_at
            "#,
        )
        .bind(&new.tag_name)
        .fetch_one(self.pool())
        .await?;
        let tag = tag_from_row(&row)?;
        tracing::info!(tag_id = tag.id.as_i64(), "tag created");
        Ok(tag)
    }

    /// Rename a tag. Only the name is mutable; returns `false` if no tag
    /// matched the id.
    pub async fn tags_rename(&self, id: TagId, new: &NewTag) -> StoreResult<bool> {
        new.validate()?;
        let result =
            sqlx::query("UPDATE tags SET tag_name = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_i64())
                .bind(&new.tag_name)
                .execute(self.pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a tag. Its join rows cascade away with it.
    pub async fn tags_delete(&self, id: TagId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
