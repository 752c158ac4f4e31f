//! On-shelf / off-shelf toggling.

use serde::{Deserialize, Serialize};

use shopadmin_core::ProductId;

use crate::error::ServiceResult;
use crate::product::ProductStatus;
use crate::repository::ProductRepository;

/// Outcome of a status change.
///
/// `succeeded: false` covers both an unknown product and an update that
/// changed no row; the repository contract does not tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub succeeded: bool,
}

impl StatusChange {
    /// Message shown by the admin front end.
    pub fn message(&self) -> &'static str {
        if self.succeeded { "success" } else { "failed" }
    }
}

/// Applies shelf status changes through a `ProductRepository`.
///
/// Both transitions are allowed unconditionally. Each call performs exactly
/// one repository update; there is no retry and no compare-and-swap, so
/// concurrent changes to the same product are last-write-wins.
#[derive(Debug, Clone)]
pub struct StatusToggleService<R> {
    repository: R,
}

impl<R> StatusToggleService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn set_status(&self, product_id: i64, desired: ProductStatus) -> ServiceResult<StatusChange> {
        let product_id = ProductId::new(product_id)?;

        let succeeded = self
            .repository
            .update_status(product_id, desired)
            .await
            .inspect_err(|e| tracing::warn!(%product_id, "status update failed: {e}"))?;

        if succeeded {
            tracing::info!(%product_id, status = %desired, "product status changed");
        } else {
            tracing::debug!(%product_id, status = %desired, "status update matched no product");
        }

        Ok(StatusChange { succeeded })
    }

    /// Same as [`set_status`](Self::set_status) but takes the raw wire code
    /// (`0` or `1`).
    pub async fn set_status_code(&self, product_id: i64, code: i64) -> ServiceResult<StatusChange> {
        // Validate the id before the code so a bad id is reported first.
        ProductId::new(product_id)?;
        let desired = ProductStatus::from_code(code)?;
        self.set_status(product_id, desired).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ServiceError;
    use crate::repository::StorageError;
    use crate::test_support::FakeRepository;

    fn service() -> (Arc<FakeRepository>, StatusToggleService<Arc<FakeRepository>>) {
        let repo = Arc::new(FakeRepository::with_products(3));
        (repo.clone(), StatusToggleService::new(repo))
    }

    #[tokio::test]
    async fn on_then_off_both_succeed() {
        let (repo, svc) = service();

        let on = svc.set_status(1, ProductStatus::OnShelf).await.unwrap();
        assert!(on.succeeded);
        assert_eq!(repo.status_of(1), Some(ProductStatus::OnShelf));

        let off = svc.set_status(1, ProductStatus::OffShelf).await.unwrap();
        assert!(off.succeeded);
        assert_eq!(off.message(), "success");
        assert_eq!(repo.status_of(1), Some(ProductStatus::OffShelf));
    }

    #[tokio::test]
    async fn unknown_product_is_a_failed_result_not_an_error() {
        let (_repo, svc) = service();

        let change = svc.set_status(999, ProductStatus::OnShelf).await.unwrap();
        assert!(!change.succeeded);
        assert_eq!(change.message(), "failed");
    }

    #[tokio::test]
    async fn non_positive_id_is_rejected_before_storage() {
        let (repo, svc) = service();

        for id in [0, -7] {
            let err = svc.set_status(id, ProductStatus::OnShelf).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidArgument(_)));
        }
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn raw_status_code_is_validated() {
        let (repo, svc) = service();

        let err = svc.set_status_code(2, 3).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
        assert_eq!(repo.calls(), 0);

        let change = svc.set_status_code(2, 0).await.unwrap();
        assert!(change.succeeded);
        assert_eq!(repo.status_of(2), Some(ProductStatus::OffShelf));
    }

    #[tokio::test]
    async fn storage_failure_propagates_after_single_attempt() {
        let (repo, svc) = service();
        repo.fail_with(StorageError::Query("deadlock detected".to_string()));

        let err = svc.set_status(1, ProductStatus::OnShelf).await.unwrap_err();

        assert!(matches!(err, ServiceError::Storage(StorageError::Query(_))));
        assert_eq!(repo.calls(), 1);
    }
}
