use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_core::{CategoryId, DomainError, DomainResult, ProductId};

/// Shelf visibility of a product.
///
/// Wire form is the integer code used by the admin front end
/// (`0` = off shelf, `1` = on shelf). No other code is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ProductStatus {
    OffShelf,
    OnShelf,
}

impl ProductStatus {
    pub fn code(self) -> i64 {
        match self {
            ProductStatus::OffShelf => 0,
            ProductStatus::OnShelf => 1,
        }
    }

    pub fn from_code(code: i64) -> DomainResult<Self> {
        match code {
            0 => Ok(ProductStatus::OffShelf),
            1 => Ok(ProductStatus::OnShelf),
            other => Err(DomainError::validation(format!(
                "status must be 0 (off shelf) or 1 (on shelf), got {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::OffShelf => "off_shelf",
            ProductStatus::OnShelf => "on_shelf",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for ProductStatus {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

impl From<ProductStatus> for i64 {
    fn from(value: ProductStatus) -> Self {
        value.code()
    }
}

/// Queryable product projection returned by listings.
///
/// Built fresh for every query; nothing holds on to it between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub category1_id: CategoryId,
    pub category1_name: Option<String>,
    pub category2_id: CategoryId,
    pub category2_name: Option<String>,
    /// Price in the smallest currency unit (e.g. cents).
    pub price: u64,
    pub stock: u32,
    pub status: ProductStatus,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductSummary {
    pub fn is_on_shelf(&self) -> bool {
        self.status == ProductStatus::OnShelf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_both_ways() {
        assert_eq!(ProductStatus::from_code(0).unwrap(), ProductStatus::OffShelf);
        assert_eq!(ProductStatus::from_code(1).unwrap(), ProductStatus::OnShelf);
        assert_eq!(ProductStatus::OnShelf.code(), 1);
        assert_eq!(ProductStatus::OffShelf.code(), 0);
    }

    #[test]
    fn unknown_status_code_is_a_validation_error() {
        for code in [-1, 2, 99] {
            match ProductStatus::from_code(code) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn status_serializes_as_integer_code() {
        assert_eq!(serde_json::to_string(&ProductStatus::OnShelf).unwrap(), "1");
        let parsed: ProductStatus = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, ProductStatus::OffShelf);
        assert!(serde_json::from_str::<ProductStatus>("5").is_err());
    }

    #[test]
    fn summary_uses_camel_case_field_names() {
        let summary = ProductSummary {
            id: ProductId::new(3).unwrap(),
            name: "Desk Lamp".to_string(),
            category1_id: CategoryId::new(1).unwrap(),
            category1_name: Some("Home".to_string()),
            category2_id: CategoryId::new(12).unwrap(),
            category2_name: None,
            price: 2599,
            stock: 4,
            status: ProductStatus::OnShelf,
            image_url: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["category1Id"], 1);
        assert_eq!(json["category2Id"], 12);
        assert_eq!(json["status"], 1);
        assert!(summary.is_on_shelf());
    }
}
