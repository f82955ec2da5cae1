//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ServiceError;
use crate::external_catalog::{validate_search_args, CatalogMovie, CatalogPage, MovieCatalog};

/// A recorded search for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSearch {
    pub query: String,
    pub page: u32,
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movies, paged like the real provider
/// - Track searches for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use reelbox_core::testing::{MockMovieCatalog, fixtures};
///
/// let catalog = MockMovieCatalog::new();
/// catalog.add_movie(fixtures::movie("tt1375666", "Inception", 2010)).await;
///
/// let page = catalog.search("incep", 1).await?;
/// assert_eq!(page.items.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockMovieCatalog {
    /// Movies in provider order.
    movies: Arc<RwLock<Vec<CatalogMovie>>>,
    /// Results per page.
    page_size: usize,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<ServiceError>>>,
}

impl Default for MockMovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieCatalog {
    /// Create a new empty mock catalog with the provider's page size of 10.
    pub fn new() -> Self {
        Self::with_page_size(10)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            movies: Arc::new(RwLock::new(Vec::new())),
            page_size: page_size.max(1),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Add a movie.
    pub async fn add_movie(&self, movie: CatalogMovie) {
        self.movies.write().await.push(movie);
    }

    /// Replace all movies at once.
    pub async fn set_movies(&self, movies: Vec<CatalogMovie>) {
        *self.movies.write().await = movies;
    }

    /// Clear all movies.
    pub async fn clear_movies(&self) {
        self.movies.write().await.clear();
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: ServiceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<ServiceError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, ServiceError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let query = validate_search_args(query, page)?;

        self.searches.write().await.push(RecordedSearch {
            query: query.to_string(),
            page,
        });

        let query_lower = query.to_lowercase();
        let movies = self.movies.read().await;
        let matches: Vec<&CatalogMovie> = movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query_lower))
            .collect();

        let items = matches
            .iter()
            .skip((page as usize - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .map(|m| (*m).clone())
            .collect();

        Ok(CatalogPage {
            items,
            total_results: matches.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_filters_and_pages() {
        let catalog = MockMovieCatalog::with_page_size(2);
        catalog
            .set_movies(vec![
                fixtures::movie("tt0000001", "Alien", 1979),
                fixtures::movie("tt0000002", "Aliens", 1986),
                fixtures::movie("tt0000003", "Alien 3", 1992),
                fixtures::movie("tt0000004", "Heat", 1995),
            ])
            .await;

        let page1 = catalog.search("alien", 1).await.unwrap();
        assert_eq!(page1.items.len(), 2);
        assert_eq!(page1.total_results, 3);

        let page2 = catalog.search("alien", 2).await.unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0].title, "Alien 3");

        assert_eq!(catalog.search_count().await, 2);
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let catalog = MockMovieCatalog::new();
        catalog
            .set_next_error(ServiceError::UpstreamAuthFailure("bad key".into()))
            .await;

        assert!(catalog.search("x", 1).await.is_err());
        assert!(catalog.search("x", 1).await.is_ok());
    }
}
