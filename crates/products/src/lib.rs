//! Products catalog administration (listing + shelf status).
//!
//! This crate holds the read model, the `ProductRepository` boundary and the two
//! services built on top of it. It performs no IO of its own: every storage
//! access goes through the repository trait.

pub mod error;
pub mod filter;
pub mod listing;
pub mod pagination;
pub mod product;
pub mod repository;
pub mod status;

#[cfg(test)]
mod test_support;

pub use error::{ServiceError, ServiceResult};
pub use filter::ProductFilter;
pub use listing::ProductListingService;
pub use pagination::{PageFormatter, PageNavigation, PageRequest, PageResult};
pub use product::{ProductStatus, ProductSummary};
pub use repository::{ProductPage, ProductRepository, StorageError};
pub use status::{StatusChange, StatusToggleService};
