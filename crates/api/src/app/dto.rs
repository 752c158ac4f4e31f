use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use shopadmin_core::{CategoryId, DomainResult};
use shopadmin_products::{ProductFilter, ProductStatus, StatusChange};

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /products` and `POST /products` (pagination + filter
/// fields, camelCase).
///
/// Admin forms submit unselected fields as `field=`; those read as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_number: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category1_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category2_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<i64>,
}

impl ListProductsQuery {
    /// Convert the filter fields; ids and status codes are validated here.
    pub fn filter(&self) -> DomainResult<ProductFilter> {
        Ok(ProductFilter {
            name: self.name.clone(),
            category1_id: self.category1_id.map(CategoryId::new).transpose()?,
            category2_id: self.category2_id.map(CategoryId::new).transpose()?,
            status: self.status.map(ProductStatus::from_code).transpose()?,
        })
    }
}

/// Parse an optional query value, treating an empty string as missing.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Decode an optional JSON filter body; an empty body means "no constraint".
pub fn filter_from_body(body: &[u8]) -> Result<ProductFilter, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProductFilter::default());
    }
    serde_json::from_slice(body)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    pub succeeded: bool,
    pub message: &'static str,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            succeeded: change.succeeded,
            message: change.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductNamesResponse {
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;
    use shopadmin_core::DomainError;

    fn parse_query(uri: &str) -> ListProductsQuery {
        let uri: Uri = uri.parse().unwrap();
        Query::<ListProductsQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn empty_query_values_read_as_absent() {
        let q = parse_query("/products?name=&category1Id=&category2Id=&status=&pageNumber=&pageSize=");
        assert_eq!(q.page_number, None);
        assert_eq!(q.page_size, None);
        assert_eq!(q.category1_id, None);
        assert_eq!(q.status, None);
        assert!(q.filter().unwrap().normalized().is_empty());
    }

    #[test]
    fn numeric_query_values_still_parse() {
        let q = parse_query("/products?pageNumber=2&pageSize=8&category2Id=21&status=0");
        assert_eq!(q.page_number, Some(2));
        assert_eq!(q.page_size, Some(8));
        assert_eq!(q.category2_id, Some(21));
        assert_eq!(q.status, Some(0));

        let uri: Uri = "/products?pageNumber=two".parse().unwrap();
        assert!(Query::<ListProductsQuery>::try_from_uri(&uri).is_err());
    }

    #[test]
    fn blank_body_is_an_empty_filter() {
        assert!(filter_from_body(b"").unwrap().is_empty());
        assert!(filter_from_body(b" \n").unwrap().is_empty());
        let filter = filter_from_body(br#"{"name":"lamp"}"#).unwrap();
        assert_eq!(filter.name.as_deref(), Some("lamp"));
        assert!(filter_from_body(b"{not json").is_err());
    }

    #[test]
    fn query_fields_become_typed_filter() {
        let q = ListProductsQuery {
            name: Some("lamp".to_string()),
            category1_id: Some(1),
            status: Some(1),
            ..Default::default()
        };
        let filter = q.filter().unwrap();
        assert_eq!(filter.category1_id, Some(CategoryId::new(1).unwrap()));
        assert_eq!(filter.status, Some(ProductStatus::OnShelf));
        assert_eq!(filter.category2_id, None);
    }

    #[test]
    fn invalid_status_or_category_is_rejected() {
        let q = ListProductsQuery {
            status: Some(7),
            ..Default::default()
        };
        assert!(matches!(q.filter(), Err(DomainError::Validation(_))));

        let q = ListProductsQuery {
            category2_id: Some(0),
            ..Default::default()
        };
        assert!(matches!(q.filter(), Err(DomainError::InvalidId(_))));
    }
}
