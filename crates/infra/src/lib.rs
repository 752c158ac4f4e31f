//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod read_model;
pub mod timeout;

pub use config::{ConfigError, StorageBackend, StorageConfig};
pub use read_model::{InMemoryProductRepository, PostgresProductRepository};
pub use timeout::TimeoutProductRepository;
