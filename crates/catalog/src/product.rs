use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, DomainError, DomainResult, ProductId, ProductTagId, TagId};

use crate::category::Category;
use crate::tag::Tag;

/// A product row as stored.
///
/// Prices are integer cents to avoid floating-point money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product together with its eagerly loaded associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product: Product,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// One product/tag association row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProductTagRow {
    pub id: ProductTagId,
    pub product_id: ProductId,
    pub tag_id: TagId,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_name: String,
    pub price_cents: i64,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("product_name cannot be empty"));
        }
        if self.price_cents < 0 {
            return Err(DomainError::validation("price_cents cannot be negative"));
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(DomainError::validation("stock cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Partial update for a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
}

impl ProductPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.product_name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("product_name cannot be empty"));
            }
        }
        if let Some(price) = self.price_cents {
            if price < 0 {
                return Err(DomainError::validation("price_cents cannot be negative"));
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(DomainError::validation("stock cannot be negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_product() -> NewProduct {
        NewProduct {
            product_name: "Plain T-Shirt".to_string(),
            price_cents: 1499,
            stock: Some(14),
            category_id: None,
        }
    }

    #[test]
    fn new_product_accepts_valid_payload() {
        assert!(valid_new_product().validate().is_ok());
    }

    #[test]
    fn new_product_rejects_blank_name() {
        let mut p = valid_new_product();
        p.product_name = "   ".to_string();
        match p.validate().unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn new_product_rejects_negative_price() {
        let mut p = valid_new_product();
        p.price_cents = -1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn new_product_rejects_negative_stock() {
        let mut p = valid_new_product();
        p.stock = Some(-5);
        assert!(p.validate().is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(ProductPatch::default().validate().is_ok());
    }

    #[test]
    fn patch_rejects_blank_name() {
        let patch = ProductPatch {
            product_name: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
