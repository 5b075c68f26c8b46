//! Product operations: eager-loaded reads, transactional writes, and the
//! tag-association reconciliation write path.

use std::collections::HashMap;

use sqlx::{Postgres, Row, Transaction};

use shopfront_catalog::{
    reconcile_tags, NewProduct, Product, ProductPatch, ProductRecord, ProductTagRow, Tag,
};
use shopfront_core::{ProductId, ProductTagId, TagId};

use crate::error::StoreResult;
use crate::store::{joined_category_from_row, product_from_row, tag_from_row, CatalogStore};

const SELECT_PRODUCT_WITH_CATEGORY: &str = r#"
    SELECT
        p.id, p.product_name, p.price_cents, p.stock, p.category_id,
        p.created_at, p.updated_at,
        c.category_name,
        c.created_at AS category_created_at,
        c.updated_at AS category_updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

impl CatalogStore {
    /// All products with category joined and tags loaded.
    pub async fn products_list(&self) -> StoreResult<Vec<ProductRecord>> {
        let query = format!("{SELECT_PRODUCT_WITH_CATEGORY} ORDER BY p.id");
        let rows = sqlx::query(&query).fetch_all(self.pool()).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(ProductRecord {
                product: product_from_row(row)?,
                category: joined_category_from_row(row)?,
                tags: Vec::new(),
            });
        }

        // Second query loads every product's tags at once, then they are
        // grouped in memory (two round trips total, regardless of list size).
        let tag_rows = sqlx::query(
            r#"
            SELECT pt.product_id, t.id, t.tag_name, t.created_at, t.updated_at
            FROM product_tags pt
            JOIN tags t ON t.id = pt.tag_id
            ORDER BY pt.product_id, t.id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        let mut by_product: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in &tag_rows {
            by_product
                .entry(row.try_get("product_id")?)
                .or_default()
                .push(tag_from_row(row)?);
        }
        for record in &mut records {
            if let Some(tags) = by_product.remove(&record.product.id.as_i64()) {
                record.tags = tags;
            }
        }

        Ok(records)
    }

    /// One product by id with category and tags, or `None`.
    pub async fn products_get(&self, id: ProductId) -> StoreResult<Option<ProductRecord>> {
        let query = format!("{SELECT_PRODUCT_WITH_CATEGORY} WHERE p.id = $1");
        let Some(row) = sqlx::query(&query)
            .bind(id.as_i64())
            .fetch_optional(self.pool())
            .await?
        else {
            return Ok(None);
        };

        let tag_rows = sqlx::query(
            r#"
            SELECT t.id, t.tag_name, t.created_at, t.updated_at
            FROM product_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.product_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(self.pool())
        .await?;

        let mut tags = Vec::with_capacity(tag_rows.len());
        for row in &tag_rows {
            tags.push(tag_from_row(row)?);
        }

        Ok(Some(ProductRecord {
            product: product_from_row(&row)?,
            category: joined_category_from_row(&row)?,
            tags,
        }))
    }

    /// Insert a product and any tag associations in one transaction.
    ///
    /// A failure on either statement rolls back both.
    pub async fn products_create(
        &self,
        new: &NewProduct,
        tag_ids: &[TagId],
    ) -> StoreResult<Product> {
        new.validate()?;

        let mut tx = self.pool().begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (product_name, price_cents, stock, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_name, price_cents, stock, category_id, created_at, updated_at
            "#,
        )
        .bind(&new.product_name)
        .bind(new.price_cents)
        .bind(new.stock.unwrap_or(10))
        .bind(new.category_id.map(i64::from))
        .fetch_one(&mut *tx)
        .await?;
        let product = product_from_row(&row)?;

        // Reconciling against an empty set dedupes the payload's tag list.
        let plan = reconcile_tags(&[], tag_ids);
        if !plan.to_insert.is_empty() {
            insert_product_tags(&mut tx, product.id, &plan.to_insert).await?;
        }

        tx.commit().await?;
        tracing::info!(
            product_id = product.id.as_i64(),
            tags = plan.to_insert.len(),
            "product created"
        );
        Ok(product)
    }

    /// Apply a field patch and, when a tag list is supplied, reconcile the
    /// product's join rows to exactly that list. Field update, deletions and
    /// insertions share one transaction.
    ///
    /// Returns `false` (after rolling back) when no product matched the id;
    /// reconciliation is not attempted in that case.
    pub async fn products_update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
        desired_tags: Option<&[TagId]>,
    ) -> StoreResult<bool> {
        patch.validate()?;

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET product_name = COALESCE($2, product_name),
                price_cents  = COALESCE($3, price_cents),
                stock        = COALESCE($4, stock),
                category_id  = COALESCE($5, category_id),
                updated_at   = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(patch.product_name.as_deref())
        .bind(patch.price_cents)
        .bind(patch.stock)
        .bind(patch.category_id.map(i64::from))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(desired) = desired_tags {
            let existing = load_product_tag_rows(&mut tx, id).await?;
            let plan = reconcile_tags(&existing, desired);

            if !plan.to_remove.is_empty() {
                let row_ids: Vec<i64> = plan.to_remove.iter().map(|r| r.as_i64()).collect();
                sqlx::query("DELETE FROM product_tags WHERE id = ANY($1)")
                    .bind(&row_ids)
                    .execute(&mut *tx)
                    .await?;
            }
            if !plan.to_insert.is_empty() {
                insert_product_tags(&mut tx, id, &plan.to_insert).await?;
            }

            tracing::info!(
                product_id = id.as_i64(),
                added = plan.to_insert.len(),
                removed = plan.to_remove.len(),
                "product tags reconciled"
            );
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a product. Join rows go with it (cascade).
    pub async fn products_delete(&self, id: ProductId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn load_product_tag_rows(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
) -> Result<Vec<ProductTagRow>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, product_id, tag_id FROM product_tags WHERE product_id = $1")
        .bind(product_id.as_i64())
        .fetch_all(&mut **tx)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        out.push(ProductTagRow {
            id: ProductTagId::from_i64(row.try_get("id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            tag_id: TagId::from_i64(row.try_get("tag_id")?),
        });
    }
    Ok(out)
}

async fn insert_product_tags(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    tag_ids: &[TagId],
) -> Result<(), sqlx::Error> {
    let ids: Vec<i64> = tag_ids.iter().map(|t| t.as_i64()).collect();
    sqlx::query(
        r#"
        INSERT INTO product_tags (product_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) AS t (tag_id)
        "#,
    )
    .bind(product_id.as_i64())
    .bind(&ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
