use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_core::DomainError;
use shopfront_infra::StoreError;

/// Map a store failure on the query path (GET, DELETE).
///
/// Unexpected database failures here are server errors.
pub fn query_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Constraint(msg) => {
            json_error(StatusCode::BAD_REQUEST, "constraint_violation", msg)
        }
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Database(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            format!("{e:?}"),
        ),
    }
}

/// Map a store failure on the mutation path (POST, PUT).
///
/// Anything short of not-found is reported as a client error, matching the
/// endpoint contract (POST/PUT fail with 400).
pub fn mutation_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Constraint(msg) => {
            json_error(StatusCode::BAD_REQUEST, "constraint_violation", msg)
        }
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Database(e) => {
            json_error(StatusCode::BAD_REQUEST, "store_error", format!("{e:?}"))
        }
    }
}

fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
