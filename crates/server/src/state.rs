use std::sync::Arc;

use reelbox_core::{
    Config, FavoritesConfig, FavoritesStore, MovieCatalog, SanitizedConfig, SearchAggregator,
};

/// Shared application state
pub struct AppState {
    config: Config,
    favorites: Arc<dyn FavoritesStore>,
    search: SearchAggregator,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Self {
        let search = SearchAggregator::new(
            catalog,
            Arc::clone(&favorites),
            config.catalog.page_size,
        );
        Self {
            config,
            favorites,
            search,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn favorites_config(&self) -> &FavoritesConfig {
        &self.config.favorites
    }

    pub fn favorites(&self) -> &dyn FavoritesStore {
        self.favorites.as_ref()
    }

    pub fn search(&self) -> &SearchAggregator {
        &self.search
    }
}
