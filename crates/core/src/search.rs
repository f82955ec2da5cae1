//! Catalog search tagged with favorite status.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::external_catalog::{CatalogMovie, MovieCatalog};
use crate::favorites::FavoritesStore;
use crate::pagination::{has_pages_after, total_pages};

/// A catalog result plus whether it is currently a favorite.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub title: String,
    pub external_id: String,
    pub year: Option<i32>,
    pub poster_url: String,
    pub is_favorite: bool,
}

impl SearchResultItem {
    fn tagged(movie: CatalogMovie, is_favorite: bool) -> Self {
        Self {
            title: movie.title,
            external_id: movie.external_id,
            year: movie.year,
            poster_url: movie.poster_url,
            is_favorite,
        }
    }
}

/// One page of favorite-tagged search results.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub items: Vec<SearchResultItem>,
    pub count: usize,
    pub total_results: u64,
    pub current_page: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
}

/// Combines catalog search with favorites membership.
pub struct SearchAggregator {
    catalog: Arc<dyn MovieCatalog>,
    favorites: Arc<dyn FavoritesStore>,
    page_size: u32,
}

impl SearchAggregator {
    /// `page_size` is the number of results the provider returns per page.
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        favorites: Arc<dyn FavoritesStore>,
        page_size: u32,
    ) -> Self {
        Self {
            catalog,
            favorites,
            page_size,
        }
    }

    /// Search the catalog and flag each result that is a favorite.
    ///
    /// Errors from the catalog are logged with the request context and
    /// returned unchanged.
    pub async fn search_with_favorites(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults, ServiceError> {
        let catalog_page = match self.catalog.search(query, page).await {
            Ok(p) => p,
            Err(e) => {
                warn!(
                    catalog = self.catalog.name(),
                    query = query,
                    page = page,
                    kind = %e.kind(),
                    error = %e,
                    "Catalog search failed"
                );
                return Err(e);
            }
        };

        let membership = self.favorites.membership_set().await;

        let items: Vec<SearchResultItem> = catalog_page
            .items
            .into_iter()
            .map(|movie| {
                let is_favorite = membership.contains(&movie.external_id);
                SearchResultItem::tagged(movie, is_favorite)
            })
            .collect();

        let pages = total_pages(catalog_page.total_results, self.page_size);

        debug!(
            query = query,
            page = page,
            results = items.len(),
            favorites = items.iter().filter(|i| i.is_favorite).count(),
            "Search aggregated"
        );

        Ok(SearchResults {
            count: items.len(),
            items,
            total_results: catalog_page.total_results,
            current_page: page,
            total_pages: pages,
            has_next_page: has_pages_after(catalog_page.total_results, self.page_size, page),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::favorites::{FavoriteRecord, JsonFavoritesStore};
    use crate::testing::{fixtures, MockMovieCatalog};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, Arc<MockMovieCatalog>, Arc<JsonFavoritesStore>, SearchAggregator) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            JsonFavoritesStore::open(dir.path().join("favorites.json"))
                .await
                .unwrap(),
        );
        let catalog = Arc::new(MockMovieCatalog::new());
        let aggregator = SearchAggregator::new(
            Arc::clone(&catalog) as Arc<dyn MovieCatalog>,
            Arc::clone(&store) as Arc<dyn FavoritesStore>,
            10,
        );
        (dir, catalog, store, aggregator)
    }

    #[tokio::test]
    async fn test_tags_favorites() {
        let (_dir, catalog, store, aggregator) = setup().await;
        catalog
            .set_movies(vec![
                fixtures::movie("tt1375666", "Inception", 2010),
                fixtures::movie("tt0816692", "Interstellar", 2014),
            ])
            .await;
        store
            .add(FavoriteRecord::new("Inception", "tt1375666", 2010, "N/A"))
            .await
            .unwrap();

        let results = aggregator.search_with_favorites("in", 1).await.unwrap();

        assert_eq!(results.count, 2);
        assert!(results.items[0].is_favorite);
        assert!(!results.items[1].is_favorite);
        assert_eq!(results.total_results, 2);
        assert_eq!(results.total_pages, 1);
        assert!(!results.has_next_page);
    }

    #[tokio::test]
    async fn test_page_metadata() {
        let (_dir, catalog, _store, aggregator) = setup().await;
        let movies = (1..=25)
            .map(|i| fixtures::movie(&format!("tt{:07}", i), &format!("Movie {}", i), 2000))
            .collect();
        catalog.set_movies(movies).await;

        let page2 = aggregator.search_with_favorites("movie", 2).await.unwrap();
        assert_eq!(page2.count, 10);
        assert_eq!(page2.total_pages, 3);
        assert!(page2.has_next_page);

        let page3 = aggregator.search_with_favorites("movie", 3).await.unwrap();
        assert_eq!(page3.count, 5);
        assert!(!page3.has_next_page);
    }

    #[tokio::test]
    async fn test_no_results() {
        let (_dir, _catalog, _store, aggregator) = setup().await;
        let results = aggregator
            .search_with_favorites("nothing", 1)
            .await
            .unwrap();
        assert!(results.items.is_empty());
        assert_eq!(results.total_results, 0);
        assert_eq!(results.total_pages, 0);
    }

    #[tokio::test]
    async fn test_propagates_catalog_error_unchanged() {
        let (_dir, catalog, _store, aggregator) = setup().await;
        catalog
            .set_next_error(ServiceError::UpstreamTimeout("slow".to_string()))
            .await;

        let err = aggregator
            .search_with_favorites("inception", 1)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamTimeout);
        assert_eq!(err.to_string(), "Catalog provider timed out: slow");
    }

    #[tokio::test]
    async fn test_rejects_blank_query() {
        let (_dir, _catalog, _store, aggregator) = setup().await;
        let err = aggregator.search_with_favorites("  ", 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
