//! Types for the favorites collection.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ServiceError;

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1800;
/// Latest accepted release year.
pub const MAX_YEAR: i32 = 2100;

/// External ids look like `tt` followed by 7 or 8 digits.
static EXTERNAL_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d{7,8}$").unwrap());

/// A user-saved catalog entry.
///
/// The whole record is supplied by the caller and never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub title: String,
    pub external_id: String,
    pub year: i32,
    /// Poster URL or `N/A`.
    pub poster_url: String,
}

impl FavoriteRecord {
    pub fn new(
        title: impl Into<String>,
        external_id: impl Into<String>,
        year: i32,
        poster_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            external_id: external_id.into(),
            year,
            poster_url: poster_url.into(),
        }
    }

    /// Check the record before it is stored.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.external_id.trim().is_empty() {
            return Err(ServiceError::invalid_argument("externalId cannot be empty"));
        }
        if !EXTERNAL_ID_PATTERN.is_match(&self.external_id) {
            return Err(ServiceError::invalid_argument(format!(
                "externalId '{}' is not a valid catalog id",
                self.external_id
            )));
        }
        if self.title.trim().is_empty() {
            return Err(ServiceError::invalid_argument("title cannot be empty"));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ServiceError::invalid_argument(format!(
                "year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }
        Ok(())
    }
}

/// One page of the favorites listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesPage {
    pub favorites: Vec<FavoriteRecord>,
    /// Number of records on this page.
    pub count: usize,
    /// Size of the whole collection, sent as text like the provider does.
    #[serde(serialize_with = "serialize_as_text")]
    pub total_results: u64,
    pub current_page: u32,
    pub total_pages: u64,
}

fn serialize_as_text<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
