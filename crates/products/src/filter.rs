//! Conjunctive product filter.

use serde::{Deserialize, Serialize};

use shopadmin_core::CategoryId;

use crate::product::{ProductStatus, ProductSummary};

/// Optional match constraints applied to a product query.
///
/// Every present field must match (logical AND). An all-empty filter matches
/// every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub category1_id: Option<CategoryId>,
    pub category2_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
}

impl ProductFilter {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category1(mut self, id: CategoryId) -> Self {
        self.category1_id = Some(id);
        self
    }

    pub fn with_category2(mut self, id: CategoryId) -> Self {
        self.category2_id = Some(id);
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Trim the name constraint; a blank name means "no constraint".
    pub fn normalized(mut self) -> Self {
        self.name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// Fill every field left unset here from `fallback`.
    pub fn with_defaults_from(self, fallback: ProductFilter) -> Self {
        Self {
            name: self.name.or(fallback.name),
            category1_id: self.category1_id.or(fallback.category1_id),
            category2_id: self.category2_id.or(fallback.category2_id),
            status: self.status.or(fallback.status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category1_id.is_none()
            && self.category2_id.is_none()
            && self.status.is_none()
    }

    /// Evaluate the filter against a single row.
    ///
    /// Storage adapters that cannot push the filter down to a query engine use
    /// this directly; SQL adapters must stay equivalent to it.
    pub fn matches(&self, product: &ProductSummary) -> bool {
        if let Some(name) = self.name.as_deref() {
            let needle = name.trim().to_lowercase();
            if !needle.is_empty() && !product.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(id) = self.category1_id {
            if product.category1_id != id {
                return false;
            }
        }
        if let Some(id) = self.category2_id {
            if product.category2_id != id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_product;

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&sample_product(1)));
        assert!(filter.matches(&sample_product(2)));
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let mut product = sample_product(1);
        product.name = "Stainless Kettle".to_string();

        assert!(ProductFilter::default().with_name("kettle").matches(&product));
        assert!(ProductFilter::default().with_name("LESS K").matches(&product));
        assert!(!ProductFilter::default().with_name("teapot").matches(&product));
    }

    #[test]
    fn blank_name_normalizes_to_no_constraint() {
        let filter = ProductFilter::default().with_name("   ").normalized();
        assert_eq!(filter.name, None);
        assert!(filter.is_empty());

        let filter = ProductFilter::default().with_name("  lamp ").normalized();
        assert_eq!(filter.name.as_deref(), Some("lamp"));
    }

    #[test]
    fn fields_combine_conjunctively() {
        let product = sample_product(5);
        let filter = ProductFilter::default()
            .with_category1(product.category1_id)
            .with_status(product.status);
        assert!(filter.matches(&product));

        let other_status = match product.status {
            ProductStatus::OnShelf => ProductStatus::OffShelf,
            ProductStatus::OffShelf => ProductStatus::OnShelf,
        };
        let filter = filter.with_status(other_status);
        assert!(!filter.matches(&product));
    }

    #[test]
    fn set_fields_win_over_fallback() {
        let c1 = CategoryId::new(1).unwrap();
        let c2 = CategoryId::new(2).unwrap();
        let primary = ProductFilter::default().with_category1(c2);
        let fallback = ProductFilter::default()
            .with_name("lamp")
            .with_category1(c1)
            .with_status(ProductStatus::OnShelf);

        let merged = primary.with_defaults_from(fallback);
        assert_eq!(merged.name.as_deref(), Some("lamp"));
        assert_eq!(merged.category1_id, Some(c2));
        assert_eq!(merged.category2_id, None);
        assert_eq!(merged.status, Some(ProductStatus::OnShelf));
    }

    #[test]
    fn deserializes_from_partial_json_body() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"name":"cup","category2Id":4}"#).unwrap();
        assert_eq!(filter.name.as_deref(), Some("cup"));
        assert_eq!(filter.category2_id.map(|c| c.get()), Some(4));
        assert_eq!(filter.category1_id, None);
        assert_eq!(filter.status, None);

        let filter: ProductFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.is_empty());
    }
}
