//! Paginated, filterable product listing.

use crate::error::ServiceResult;
use crate::filter::ProductFilter;
use crate::pagination::{PageFormatter, PageRequest, PageResult};
use crate::product::ProductSummary;
use crate::repository::{ProductPage, ProductRepository};

/// Read-only listing over a `ProductRepository`.
///
/// Holds no state besides the repository handle, so one instance can serve
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct ProductListingService<R> {
    repository: R,
}

impl<R> ProductListingService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List products matching `filter`.
    ///
    /// Pagination is applied only when both `page_number` and `page_size` are
    /// given; either one below 1 is rejected. Storage failures are returned
    /// as-is and never retried here.
    pub async fn list(
        &self,
        filter: ProductFilter,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> ServiceResult<PageResult<ProductSummary>> {
        let page = PageRequest::from_parts(page_number, page_size)?;
        let filter = filter.normalized();

        tracing::debug!(
            page_number = page.map(|p| p.page_number()),
            page_size = page.map(|p| p.page_size()),
            filter = ?filter,
            "listing products"
        );

        let ProductPage { items, total_count } = self
            .repository
            .find_page(&filter, page)
            .await
            .inspect_err(|e| tracing::warn!("product listing failed: {e}"))?;

        Ok(PageFormatter::format(items, total_count, page))
    }

    /// Names of every product, sorted (filter drop-down data).
    pub async fn product_names(&self) -> ServiceResult<Vec<String>> {
        let names = self
            .repository
            .list_product_names()
            .await
            .inspect_err(|e| tracing::warn!("product name lookup failed: {e}"))?;
        Ok(names)
    }
}
