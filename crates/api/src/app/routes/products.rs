use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shopadmin_products::ProductFilter;

use crate::app::dto::{self, ListProductsQuery, ProductNamesResponse, StatusChangeResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(search_products))
        .route("/names", get(product_names))
        .route("/list/:page_number/:page_size", post(search_products_paged))
        .route("/:id/status/:value", post(set_product_status))
}

/// `GET /products?pageNumber=&pageSize=&name=&category1Id=&category2Id=&status=`
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", e.body_text()),
    };
    let filter = match query.filter() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    respond_with_page(&services, filter, query.page_number, query.page_size).await
}

/// `POST /products?pageNumber=&pageSize=&<filter fields>` with an optional
/// JSON filter body. Fields set in the body take precedence over the query.
pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
    body: Bytes,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", e.body_text()),
    };
    let query_filter = match query.filter() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };
    let body_filter = match dto::filter_from_body(&body) {
        Ok(f) => f,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.to_string()),
    };

    let filter = body_filter.normalized().with_defaults_from(query_filter);
    respond_with_page(&services, filter, query.page_number, query.page_size).await
}

/// `POST /products/list/{pageNumber}/{pageSize}` with an optional JSON filter body.
pub async fn search_products_paged(
    Extension(services): Extension<Arc<AppServices>>,
    Path((page_number, page_size)): Path<(String, String)>,
    body: Bytes,
) -> axum::response::Response {
    let (page_number, page_size) = match (parse_i64(&page_number), parse_i64(&page_size)) {
        (Some(n), Some(s)) => (n, s),
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_argument",
                "pageNumber and pageSize must be integers",
            );
        }
    };
    let filter = match dto::filter_from_body(&body) {
        Ok(f) => f,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.to_string()),
    };

    respond_with_page(&services, filter, Some(page_number), Some(page_size)).await
}

/// `GET /products/names` (filter drop-down data).
pub async fn product_names(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.listing.product_names().await {
        Ok(names) => (StatusCode::OK, Json(ProductNamesResponse { names })).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `POST /products/{id}/status/{value}`; value is `0` (off shelf) or `1` (on shelf).
pub async fn set_product_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, value)): Path<(String, String)>,
) -> axum::response::Response {
    let Some(product_id) = parse_i64(&id) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    };
    let Some(code) = parse_i64(&value) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_argument", "status must be 0 or 1");
    };

    match services.toggles.set_status_code(product_id, code).await {
        Ok(change) => (StatusCode::OK, Json(StatusChangeResponse::from(change))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

async fn respond_with_page(
    services: &AppServices,
    filter: ProductFilter,
    page_number: Option<i64>,
    page_size: Option<i64>,
) -> axum::response::Response {
    match services.listing.list(filter, page_number, page_size).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn parse_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
