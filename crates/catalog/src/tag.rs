use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, TagId};

use crate::product::Product;

/// A tag row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tag together with its eagerly loaded products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub tag: Tag,
    pub products: Vec<Product>,
}

/// Payload for creating or renaming a tag. Only the name is mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub tag_name: String,
}

impl NewTag {
    pub fn validate(&self) -> DomainResult<()> {
        if self.tag_name.trim().is_empty() {
            return Err(DomainError::validation("tag_name cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tag_rejects_blank_name() {
        let tag = NewTag {
            tag_name: " ".to_string(),
        };
        match tag.validate().unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn new_tag_accepts_non_blank_name() {
        let tag = NewTag {
            tag_name: "green".to_string(),
        };
        assert!(tag.validate().is_ok());
    }
}
