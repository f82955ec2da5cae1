//! Favorites storage.
//!
//! The store owns the favorites collection and its durable file. Every
//! listing and mutation reloads from disk first, so edits made to the file
//! by another process are picked up before membership is checked.

mod json_store;
mod types;

pub use json_store::JsonFavoritesStore;
pub use types::*;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::ServiceError;

/// Trait for favorites storage backends.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Re-read the durable state, discarding the in-memory copy.
    ///
    /// Unreadable or malformed data is treated as an empty collection.
    async fn reload(&self);

    /// List one page of favorites in insertion order.
    ///
    /// An empty collection yields an empty page, never `NotFound`.
    async fn list(&self, page: u32, page_size: u32) -> Result<FavoritesPage, ServiceError>;

    /// Get a single favorite by external id, after a reload.
    async fn get(&self, external_id: &str) -> Result<FavoriteRecord, ServiceError>;

    /// Append a favorite and persist the whole collection.
    ///
    /// Fails with `AlreadyExists` if the external id is already stored.
    async fn add(&self, record: FavoriteRecord) -> Result<FavoriteRecord, ServiceError>;

    /// Remove the favorite with this external id and persist.
    ///
    /// Fails with `NotFound` if no such favorite exists.
    async fn remove(&self, external_id: &str) -> Result<FavoriteRecord, ServiceError>;

    /// Membership check against the in-memory collection (no reload).
    async fn exists(&self, external_id: &str) -> bool;

    /// All stored external ids (no reload).
    async fn membership_set(&self) -> HashSet<String>;

    /// Number of stored favorites (no reload).
    async fn count(&self) -> usize;
}
