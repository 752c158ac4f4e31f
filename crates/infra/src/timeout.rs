//! Deadline decorator for product repositories.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use shopadmin_core::ProductId;
use shopadmin_products::{
    PageRequest, ProductFilter, ProductPage, ProductRepository, ProductStatus, StorageError,
};

/// Wraps a repository so no single call runs longer than `timeout`.
///
/// An expired call is reported as `StorageError::Timeout`; the inner future is
/// dropped, so whether the storage engine finished the work is unknown.
#[derive(Debug, Clone)]
pub struct TimeoutProductRepository<R> {
    inner: R,
    timeout: Duration,
}

impl<R> TimeoutProductRepository<R> {
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "storage call timed out"
                );
                Err(StorageError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl<R> ProductRepository for TimeoutProductRepository<R>
where
    R: ProductRepository,
{
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError> {
        self.bounded("find_page", self.inner.find_page(filter, page)).await
    }

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError> {
        self.bounded("update_status", self.inner.update_status(product_id, status))
            .await
    }

    async fn list_product_names(&self) -> Result<Vec<String>, StorageError> {
        self.bounded("list_product_names", self.inner.list_product_names())
            .await
    }
}
