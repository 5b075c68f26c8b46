//! Catalog domain module.
//!
//! This crate contains the record types for products, categories and tags,
//! plus the tag-association reconciliation algorithm, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod product;
pub mod reconcile;
pub mod tag;

pub use category::{Category, CategoryRecord, NewCategory};
pub use product::{NewProduct, Product, ProductPatch, ProductRecord, ProductTagRow};
pub use reconcile::{reconcile_tags, TagReconciliation};
pub use tag::{NewTag, Tag, TagRecord};
