//! `shopfront-infra` — Postgres-backed data access for the catalog.
//!
//! The store is an explicitly constructed context around a connection pool;
//! nothing in here is global state. Handlers receive it via the router.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::CatalogStore;
