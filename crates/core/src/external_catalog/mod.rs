//! External movie catalog integration.
//!
//! A [`MovieCatalog`] turns a `(query, page)` request into a single outbound
//! provider call and normalizes the result into a [`CatalogPage`] or a
//! classified [`ServiceError`].

mod omdb;
mod types;

pub use omdb::OmdbClient;
pub use types::*;

use async_trait::async_trait;

use crate::error::ServiceError;

/// Trait for catalog search backends.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Backend name, used in logs and metrics.
    fn name(&self) -> &str;

    /// Search the catalog. `page` is 1-based.
    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, ServiceError>;
}

/// Check search arguments and return the trimmed query.
pub fn validate_search_args(query: &str, page: u32) -> Result<&str, ServiceError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::invalid_argument("search query cannot be empty"));
    }
    if page < 1 {
        return Err(ServiceError::invalid_argument("page must be at least 1"));
    }
    Ok(query)
}
