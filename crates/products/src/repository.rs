//! Persistence boundary for the product catalog.
//!
//! This module defines what listing and status changes need from storage
//! without making any storage assumptions. Adapters live in `shopadmin-infra`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use shopadmin_core::ProductId;

use crate::filter::ProductFilter;
use crate::pagination::PageRequest;
use crate::product::{ProductStatus, ProductSummary};

/// Infrastructure failure reported by a repository.
///
/// Callers may retry with backoff; the services never retry on their own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage query failed: {0}")]
    Query(String),

    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Rows for one page plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub items: Vec<ProductSummary>,
    pub total_count: u64,
}

/// Storage capability consumed by the listing and status services.
///
/// ## Contract
///
/// - `find_page` applies every present filter field (logical AND) and orders
///   rows by ascending product id, so repeated calls over unchanged data return
///   the same rows. With `page = None` every matching row is returned.
/// - `update_status` returns `Ok(false)` when no row was changed (unknown id);
///   that is an ordinary outcome, not an error. `StorageError` is reserved
///   for infrastructure faults.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError>;

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError>;

    /// All product names, sorted, for populating filter drop-downs.
    async fn list_product_names(&self) -> Result<Vec<String>, StorageError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError> {
        (**self).find_page(filter, page).await
    }

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError> {
        (**self).update_status(product_id, status).await
    }

    async fn list_product_names(&self) -> Result<Vec<String>, StorageError> {
        (**self).list_product_names().await
    }
}
