use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use shopadmin_core::{CategoryId, ProductId};

use crate::filter::ProductFilter;
use crate::pagination::PageRequest;
use crate::product::{ProductStatus, ProductSummary};
use crate::repository::{ProductPage, ProductRepository, StorageError};

pub(crate) fn sample_product(id: i64) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(id).unwrap(),
        name: format!("Product {id:03}"),
        category1_id: CategoryId::new(1 + id % 2).unwrap(),
        category1_name: None,
        category2_id: CategoryId::new(10 + id % 3).unwrap(),
        category2_name: None,
        price: 100 * id as u64,
        stock: 5,
        status: if id % 2 == 0 {
            ProductStatus::OnShelf
        } else {
            ProductStatus::OffShelf
        },
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Minimal in-crate repository double; counts calls and can be told to fail.
#[derive(Default)]
pub(crate) struct FakeRepository {
    rows: Mutex<Vec<ProductSummary>>,
    failure: Mutex<Option<StorageError>>,
    calls: AtomicUsize,
}

impl FakeRepository {
    pub(crate) fn with_products(count: i64) -> Self {
        let repo = Self::default();
        *repo.rows.lock().unwrap() = (1..=count).map(sample_product).collect();
        repo
    }

    pub(crate) fn fail_with(&self, err: StorageError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn status_of(&self, id: i64) -> Option<ProductStatus> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id.get() == id)
            .map(|p| p.status)
    }

    fn enter(&self) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductRepository for FakeRepository {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError> {
        self.enter()?;
        let rows = self.rows.lock().unwrap();
        let matching: Vec<_> = rows.iter().filter(|p| filter.matches(p)).cloned().collect();
        let total_count = matching.len() as u64;
        let items = match page {
            Some(page) => matching
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.page_size() as usize)
                .collect(),
            None => matching,
        };
        Ok(ProductPage { items, total_count })
    }

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == product_id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_product_names(&self) -> Result<Vec<String>, StorageError> {
        self.enter()?;
        let mut names: Vec<_> = self.rows.lock().unwrap().iter().map(|p| p.name.clone()).collect();
        names.sort();
        Ok(names)
    }
}
