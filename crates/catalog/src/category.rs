use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, DomainError, DomainResult};

use crate::product::Product;

/// A category row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category together with its eagerly loaded products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub category_name: String,
}

impl NewCategory {
    pub fn validate(&self) -> DomainResult<()> {
        if self.category_name.trim().is_empty() {
            return Err(DomainError::validation("category_name cannot be empty"));
        }
        Ok(())
    }
}
