use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopfront_catalog::NewTag;
use shopfront_core::TagId;
use shopfront_infra::CatalogStore;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/:id", get(get_tag).put(update_tag).delete(delete_tag))
}

pub async fn list_tags(Extension(store): Extension<Arc<CatalogStore>>) -> axum::response::Response {
    match store.tags_list().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::tag_record_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn get_tag(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TagId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid tag id");
        }
    };
    match store.tags_get(id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(dto::tag_record_to_json(&record))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no tag found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn create_tag(
    Extension(store): Extension<Arc<CatalogStore>>,
    payload: Result<Json<dto::CreateTagRequest>, JsonRejection>,
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

    let new = NewTag {
        tag_name: body.tag_name,
    };
    match store.tags_create(&new).await {
        Ok(tag) => (StatusCode::CREATED, Json(dto::tag_to_json(&tag))).into_response(),
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn update_tag(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::UpdateTagRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: TagId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid tag id");
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

    let new = NewTag {
        tag_name: body.tag_name,
    };
    match store.tags_rename(id, &new).await {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "tag updated successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no tag found with that id",
        ),
        Err(e) => errors::mutation_error_to_response(e),
    }
}

pub async fn delete_tag(
    Extension(store): Extension<Arc<CatalogStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TagId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid tag id");
        }
    };
    match store.tags_delete(id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "tag deleted successfully"})),
        )
            .into_response(),
        Ok(false) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no tag found with that id",
        ),
        Err(e) => errors::query_error_to_response(e),
    }
}
