//! Types for catalog search results.

use serde::{Deserialize, Serialize};

/// A movie as returned by the catalog provider's search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMovie {
    /// Movie title.
    pub title: String,
    /// Provider identifier (e.g. `tt1375666`).
    pub external_id: String,
    /// Release year; `None` when the provider value is not a year.
    pub year: Option<i32>,
    /// Poster URL, or the provider's `N/A` sentinel.
    pub poster_url: String,
}

/// One page of catalog search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<CatalogMovie>,
    /// Total number of matches across all pages.
    pub total_results: u64,
}

impl CatalogPage {
    /// The page returned when the provider reports no matches.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Provider search response, classified at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// Matches found. The total arrives as text and is parsed later.
    Success {
        items: Vec<CatalogMovie>,
        total_text: Option<String>,
    },
    /// The provider's "no results" sentinel.
    NotFound,
    /// The provider refused the request with a message.
    Error { message: String },
}

/// Extract the year from provider text such as `2010`, `2010–2013` or `2010–`.
pub fn parse_year(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}
