use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopfront_catalog::{NewProduct, ProductPatch};
use shopfront_core::ProductId;
use shopfront_infra::CatalogStore;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(store): Extension<Arc<CatalogStore>>,
) -> axum::response::Response {
    match store.products_list().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::product_record_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };
    match store.products_get(id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(dto::product_record_to_json(&record))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no product found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(store): Extension<Arc<CatalogStore>>,
    payload: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    // Malformed/incomplete payloads are the caller's fault: 400, not 422.
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_payload",
                rejection.body_text(),
            );
        }
    };

    let new = NewProduct {
        product_name: body.product_name,
        price_cents: body.price_cents,
        stock: body.stock,
        category_id: body.category_id,
    };
    let tag_ids = body.tag_ids.unwrap_or_default();

    match store.products_create(&new, &tag_ids).await {
        Ok(product) => (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_payload",
                rejection.body_text(),
            );
        }
    };

    let patch = ProductPatch {
        product_name: body.product_name,
        price_cents: body.price_cents,
        stock: body.stock,
        category_id: body.category_id,
    };

    match store
        .products_update(id, &patch, body.tag_ids.as_deref())
        .await
    {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "product updated successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no product found with that id",
        ),
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };
    match store.products_delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "product deleted successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no product found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}
