use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog API key is present (missing key is fatal at startup)
/// - Catalog timeout and page size are positive
/// - Favorites page sizes are consistent
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.catalog.api_key.trim().is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    if config.catalog.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.catalog.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.page_size cannot be 0".to_string(),
        ));
    }

    if config.storage.file_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.file_name cannot be empty".to_string(),
        ));
    }

    let favorites = &config.favorites;
    if favorites.default_page_size == 0 || favorites.default_page_size > favorites.max_page_size {
        return Err(ConfigError::ValidationError(format!(
            "favorites.default_page_size must be between 1 and {}",
            favorites.max_page_size
        )));
    }

    Ok(())
}
