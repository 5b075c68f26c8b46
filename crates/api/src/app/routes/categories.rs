use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopfront_catalog::NewCategory;
use shopfront_core::CategoryId;
use shopfront_infra::CatalogStore;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

pub async fn list_categories(
    Extension(store): Extension<Arc<CatalogStore>>,
) -> axum::response::Response {
    match store.categories_list().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::category_record_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id");
        }
    };
    match store.categories_get(id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(dto::category_record_to_json(&record))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no category found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(store): Extension<Arc<CatalogStore>>,
    payload: Result<Json<dto::CreateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
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

    let new = NewCategory {
        category_name: body.category_name,
    };
    match store.categories_create(&new).await {
        Ok(category) => {
            (StatusCode::CREATED, Json(dto::category_to_json(&category))).into_response()
        }
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::UpdateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id");
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

    let new = NewCategory {
        category_name: body.category_name,
    };
    match store.categories_rename(id, &new).await {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "category updated successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no category found with that id",
        ),
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id");
        }
    };
    match store.categories_delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "category deleted successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no category found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}
