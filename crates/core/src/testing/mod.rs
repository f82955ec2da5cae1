//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock catalog provider and fixtures, allowing the
//! search and favorites flows to be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelbox_core::testing::{fixtures, MockMovieCatalog};
//!
//! let catalog = MockMovieCatalog::new();
//! catalog.set_movies(vec![fixtures::movie("tt1375666", "Inception", 2010)]).await;
//!
//! // Use in SearchAggregator or AppState...
//! ```

mod mock_movie_catalog;

pub use mock_movie_catalog::{MockMovieCatalog, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::external_catalog::CatalogMovie;
    use crate::favorites::FavoriteRecord;

    /// Create a catalog movie with a poster URL derived from its id.
    pub fn movie(external_id: &str, title: &str, year: i32) -> CatalogMovie {
        CatalogMovie {
            title: title.to_string(),
            external_id: external_id.to_string(),
            year: Some(year),
            poster_url: format!("https://img.example/{}.jpg", external_id),
        }
    }

    /// Create a favorite record matching [`movie`].
    pub fn favorite(external_id: &str, title: &str, year: i32) -> FavoriteRecord {
        FavoriteRecord::new(
            title,
            external_id,
            year,
            format!("https://img.example/{}.jpg", external_id),
        )
    }

    /// The record used in the add/list/remove walkthrough.
    pub fn inception() -> FavoriteRecord {
        FavoriteRecord::new("Inception", "tt1375666", 2010, "https://x/p.jpg")
    }
}
