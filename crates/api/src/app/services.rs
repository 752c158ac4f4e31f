use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use shopadmin_infra::{
    InMemoryProductRepository, PostgresProductRepository, StorageBackend, StorageConfig,
    TimeoutProductRepository,
};
use shopadmin_products::{ProductListingService, ProductRepository, StatusToggleService};

/// Type-erased repository shared by both services.
pub type SharedRepository = Arc<dyn ProductRepository>;

/// Everything the handlers need; cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    pub listing: ProductListingService<SharedRepository>,
    pub toggles: StatusToggleService<SharedRepository>,
}

impl AppServices {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            listing: ProductListingService::new(repository.clone()),
            toggles: StatusToggleService::new(repository),
        }
    }
}

/// Select and connect the configured storage, bounded by the storage timeout.
pub async fn build_services(config: &StorageConfig) -> anyhow::Result<AppServices> {
    let repository: SharedRepository = match &config.backend {
        StorageBackend::InMemory { seed_demo_data } => {
            let store = if *seed_demo_data {
                InMemoryProductRepository::seeded()
            } else {
                InMemoryProductRepository::new()
            };
            if store.is_empty() {
                tracing::warn!("in-memory product store starts empty");
            }
            let products = store.len();
            let store = TimeoutProductRepository::new(store, config.timeout);
            tracing::info!(
                products,
                timeout_ms = store.timeout().as_millis() as u64,
                "using in-memory product store"
            );
            Arc::new(store)
        }
        StorageBackend::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .acquire_timeout(config.timeout)
                .connect(database_url)
                .await
                .context("failed to connect to Postgres")?;
            let store = PostgresProductRepository::new(pool);
            store
                .ensure_schema()
                .await
                .context("failed to apply product schema")?;
            let store = TimeoutProductRepository::new(store, config.timeout);
            tracing::info!(
                timeout_ms = store.timeout().as_millis() as u64,
                "using Postgres product store"
            );
            Arc::new(store)
        }
    };

    Ok(AppServices::new(repository))
}
