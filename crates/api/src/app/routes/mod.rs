use axum::Router;

pub mod categories;
pub mod products;
pub mod system;
pub mod tags;

/// Router for all catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/tags", tags::router())
        .nest("/categories", categories::router())
}
