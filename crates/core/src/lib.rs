pub mod config;
pub mod error;
pub mod external_catalog;
pub mod favorites;
pub mod metrics;
pub mod pagination;
pub mod search;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, CatalogConfig,
    Config, ConfigError, FavoritesConfig, SanitizedConfig, ServerConfig, StorageConfig,
};
pub use error::{ErrorKind, ServiceError};
pub use external_catalog::{CatalogMovie, CatalogPage, MovieCatalog, OmdbClient};
pub use favorites::{FavoriteRecord, FavoritesPage, FavoritesStore, JsonFavoritesStore};
pub use pagination::PageWindow;
pub use search::{SearchAggregator, SearchResultItem, SearchResults};
