use serde::Deserialize;

use shopfront_catalog::{Category, CategoryRecord, Product, ProductRecord, Tag, TagRecord};
use shopfront_core::{CategoryId, TagId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: String,
    pub price_cents: i64,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
    /// Tag ids to associate with the new product.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
    /// When present (even empty), the product's tag set is reconciled to
    /// exactly this list.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<TagId>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub tag_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    // Only the name is mutable; any other payload fields are ignored.
    pub tag_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub category_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category_name: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": p.id,
        "product_name": p.product_name,
        "price_cents": p.price_cents,
        "stock": p.stock,
        "category_id": p.category_id,
        "created_at": p.created_at.to_rfc3339(),
        "updated_at": p.updated_at.to_rfc3339(),
    })
}

pub fn product_record_to_json(record: &ProductRecord) -> serde_json::Value {
    let mut value = product_to_json(&record.product);
    value["category"] = match &record.category {
        Some(category) => category_to_json(category),
        None => serde_json::Value::Null,
    };
    value["tags"] = record.tags.iter().map(tag_to_json).collect();
    value
}

pub fn tag_to_json(t: &Tag) -> serde_json::Value {
    serde_json::json!({
        "id": t.id,
        "tag_name": t.tag_name,
        "created_at": t.created_at.to_rfc3339(),
        "updated_at": t.updated_at.to_rfc3339(),
    })
}

pub fn tag_record_to_json(record: &TagRecord) -> serde_json::Value {
    let mut value = tag_to_json(&record.tag);
    value["products"] = record.products.iter().map(product_to_json).collect();
    value
}

pub fn category_to_json(c: &Category) -> serde_json::Value {
    serde_json::json!({
        "id": c.id,
        "category_name": c.category_name,
        "created_at": c.created_at.to_rfc3339(),
        "updated_at": c.updated_at.to_rfc3339(),
    })
}

pub fn category_record_to_json(record: &CategoryRecord) -> serde_json::Value {
    let mut value = category_to_json(&record.category);
    value["products"] = record.products.iter().map(product_to_json).collect();
    value
}
