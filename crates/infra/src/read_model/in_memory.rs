use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use shopadmin_core::{CategoryId, ProductId};
use shopadmin_products::{
    PageRequest, ProductFilter, ProductPage, ProductRepository, ProductStatus, ProductSummary,
    StorageError,
};

/// In-memory product store for tests/dev.
///
/// Rows are kept in a `BTreeMap` keyed by id, which gives the ascending-id
/// ordering the repository contract asks for without a separate sort.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<BTreeMap<ProductId, ProductSummary>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = ProductSummary>) -> Self {
        let repo = Self::new();
        for p in products {
            repo.upsert(p);
        }
        repo
    }

    /// A small catalog spread over a few categories, for local runs.
    pub fn seeded() -> Self {
        Self::with_products(demo_catalog())
    }

    /// Insert or replace a row, recovering the lock if a writer panicked.
    pub fn upsert(&self, product: ProductSummary) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(product.id, product);
    }

    pub fn get(&self, id: ProductId) -> Option<ProductSummary> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("in-memory product store lock poisoned".to_string())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let matching = map.values().filter(|p| filter.matches(p));

        let total_count = matching.clone().count() as u64;
        let items = match page {
            Some(page) => {
                let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
                let take = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
                matching.skip(skip).take(take).cloned().collect()
            }
            None => matching.cloned().collect(),
        };

        Ok(ProductPage { items, total_count })
    }

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match map.get_mut(&product_id) {
            Some(row) => {
                row.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_product_names(&self) -> Result<Vec<String>, StorageError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut names: Vec<String> = map.values().map(|p| p.name.clone()).collect();
        names.sort();
        Ok(names)
    }
}

/// (category1 id, name, [(category2 id, name, [product names])])
const DEMO: &[(i64, &str, &[(i64, &str, &[&str])])] = &[
    (
        1,
        "Home",
        &[
            (11, "Kitchen", &["Stainless Kettle", "Cast Iron Pan", "Chef Knife", "Spice Rack"]),
            (12, "Lighting", &["Desk Lamp", "Floor Lamp", "LED Strip"]),
        ],
    ),
    (
        2,
        "Electronics",
        &[
            (21, "Audio", &["Wireless Earbuds", "Bookshelf Speaker", "Studio Headphones"]),
            (22, "Accessories", &["USB-C Cable", "Power Bank", "Laptop Stand", "Webcam Cover"]),
        ],
    ),
    (
        3,
        "Outdoor",
        &[
            (31, "Camping", &["Dome Tent", "Sleeping Bag", "Camp Stove"]),
            (32, "Garden", &["Garden Hose", "Pruning Shears", "Seed Starter Kit"]),
        ],
    ),
];

fn demo_catalog() -> Vec<ProductSummary> {
    let epoch = DateTime::<Utc>::from_timestamp(1_710_172_800, 0).unwrap_or_default();
    let mut products = Vec::new();
    let mut next_id = 1i64;

    for (c1_id, c1_name, subcategories) in DEMO {
        for (c2_id, c2_name, names) in subcategories.iter() {
            for name in names.iter() {
                let (Ok(id), Ok(c1), Ok(c2)) = (
                    ProductId::new(next_id),
                    CategoryId::new(*c1_id),
                    CategoryId::new(*c2_id),
                ) else {
                    continue;
                };
                products.push(ProductSummary {
                    id,
                    name: (*name).to_string(),
                    category1_id: c1,
                    category1_name: Some((*c1_name).to_string()),
                    category2_id: c2,
                    category2_name: Some((*c2_name).to_string()),
                    price: 499 + 250 * next_id as u64,
                    stock: (next_id as u32 * 7) % 40,
                    status: if next_id % 3 == 0 {
                        ProductStatus::OffShelf
                    } else {
                        ProductStatus::OnShelf
                    },
                    image_url: Some(format!("/static/img/products/{next_id}.jpg")),
                    created_at: epoch + Duration::hours(next_id),
                });
                next_id += 1;
            }
        }
    }

    products
}
