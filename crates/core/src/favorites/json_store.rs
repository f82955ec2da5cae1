//! JSON file backed favorites store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::types::{FavoriteRecord, FavoritesPage};
use super::FavoritesStore;
use crate::error::ServiceError;
use crate::metrics;
use crate::pagination::favorites_page_window;

/// Favorites store persisted as a pretty-printed JSON array.
///
/// Reload, mutation and persistence happen under a single lock, so
/// concurrent requests in this process cannot lose each other's updates.
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a partially written file. Other processes writing the
/// same file are not coordinated with.
pub struct JsonFavoritesStore {
    path: PathBuf,
    favorites: Mutex<Vec<FavoriteRecord>>,
}

impl JsonFavoritesStore {
    /// Open the store at `path`, creating the directory and an empty
    /// collection file if they do not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                ServiceError::io_failure(
                    format!("Failed to create data directory {}", parent.display()),
                    e,
                )
            })?;
        }

        if needs_empty_file(&path, fs::try_exists(&path).await) {
            info!(path = %path.display(), "Creating empty favorites file");
            write_atomically(&path, &[]).await?;
        }

        let favorites = read_favorites(&path).await;
        debug!(path = %path.display(), count = favorites.len(), "Favorites store opened");

        Ok(Self {
            path,
            favorites: Mutex::new(favorites),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FavoritesStore for JsonFavoritesStore {
    async fn reload(&self) {
        let mut favorites = self.favorites.lock().await;
        *favorites = read_favorites(&self.path).await;
    }

    async fn list(&self, page: u32, page_size: u32) -> Result<FavoritesPage, ServiceError> {
        let mut favorites = self.favorites.lock().await;
        *favorites = read_favorites(&self.path).await;

        let window = favorites_page_window(favorites.len() as u64, page, page_size)?;
        let slice = favorites[window.range()].to_vec();

        Ok(FavoritesPage {
            count: slice.len(),
            favorites: slice,
            total_results: window.total_items,
            current_page: window.current_page,
            total_pages: window.total_pages,
        })
    }

    async fn get(&self, external_id: &str) -> Result<FavoriteRecord, ServiceError> {
        let external_id = require_id(external_id)?;

        let mut favorites = self.favorites.lock().await;
        *favorites = read_favorites(&self.path).await;

        favorites
            .iter()
            .find(|f| f.external_id == external_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("favorite {}", external_id)))
    }

    async fn add(&self, record: FavoriteRecord) -> Result<FavoriteRecord, ServiceError> {
        let result: Result<FavoriteRecord, ServiceError> = async {
            record.validate()?;

            let mut favorites = self.favorites.lock().await;
            *favorites = read_favorites(&self.path).await;

            if favorites
                .iter()
                .any(|f| f.external_id == record.external_id)
            {
                return Err(ServiceError::AlreadyExists(format!(
                    "favorite {}",
                    record.external_id
                )));
            }

            favorites.push(record.clone());
            write_atomically(&self.path, &favorites).await?;

            info!(external_id = %record.external_id, title = %record.title, "Favorite added");
            Ok(record)
        }
        .await;

        metrics::record_favorites_mutation("add", outcome(&result));
        result
    }

    async fn remove(&self, external_id: &str) -> Result<FavoriteRecord, ServiceError> {
        let result: Result<FavoriteRecord, ServiceError> = async {
            let external_id = require_id(external_id)?;

            let mut favorites = self.favorites.lock().await;
            *favorites = read_favorites(&self.path).await;

            let index = favorites
                .iter()
                .position(|f| f.external_id == external_id)
                .ok_or_else(|| ServiceError::NotFound(format!("favorite {}", external_id)))?;

            let removed = favorites.remove(index);
            write_atomically(&self.path, &favorites).await?;

            info!(external_id = %removed.external_id, "Favorite removed");
            Ok(removed)
        }
        .await;

        metrics::record_favorites_mutation("remove", outcome(&result));
        result
    }

    async fn exists(&self, external_id: &str) -> bool {
        let external_id = external_id.trim();
        self.favorites
            .lock()
            .await
            .iter()
            .any(|f| f.external_id == external_id)
    }

    async fn membership_set(&self) -> HashSet<String> {
        self.favorites
            .lock()
            .await
            .iter()
            .map(|f| f.external_id.clone())
            .collect()
    }

    async fn count(&self) -> usize {
        self.favorites.lock().await.len()
    }
}

/// Only a file known to be absent is seeded. A failed existence check leaves
/// whatever is on disk alone.
fn needs_empty_file(path: &Path, exists: std::io::Result<bool>) -> bool {
    match exists {
        Ok(exists) => !exists,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot check favorites file, not creating it");
            false
        }
    }
}

fn require_id(external_id: &str) -> Result<&str, ServiceError> {
    let external_id = external_id.trim();
    if external_id.is_empty() {
        return Err(ServiceError::invalid_argument("externalId cannot be empty"));
    }
    Ok(external_id)
}

fn outcome<T>(result: &Result<T, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => e.kind().as_str(),
    }
}

/// Read the collection from disk. Any failure yields an empty collection.
async fn read_favorites(path: &Path) -> Vec<FavoriteRecord> {
    let contents = match fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Favorites file missing, using empty collection");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read favorites file, using empty collection");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&contents) {
        Ok(favorites) => favorites,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Favorites file is malformed, using empty collection");
            Vec::new()
        }
    }
}

/// Replace the file at `path` with the full collection.
async fn write_atomically(path: &Path, favorites: &[FavoriteRecord]) -> Result<(), ServiceError> {
    let bytes = serde_json::to_vec_pretty(favorites)?;
    let temp_path = temp_path_for(path);

    let write = async {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.write_all(b"\n").await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, path).await
    };

    if let Err(e) = write.await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(ServiceError::io_failure(
            format!("Failed to write favorites to {}", path.display()),
            e,
        ));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "favorites.json".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}
