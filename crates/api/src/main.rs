use std::sync::Arc;

use shopfront_infra::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfront_observability::init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set; using local dev default");
        "postgres://localhost/shopfront".to_string()
    });
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let store = Arc::new(CatalogStore::connect(&database_url).await?);
    store.apply_schema().await?;

    let app = shopfront_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
