use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopadmin_products::{ServiceError, StorageError};

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg),
        ServiceError::Storage(StorageError::Unavailable(msg)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", msg)
        }
        ServiceError::Storage(e @ StorageError::Timeout(_)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "storage_timeout", e.to_string())
        }
        ServiceError::Storage(StorageError::Query(msg)) => {
            json_error(StatusCode::BAD_GATEWAY, "storage_error", msg)
        }
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
