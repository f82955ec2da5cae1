use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides, e.g. `REELBOX_CATALOG__API_KEY`.
pub const ENV_PREFIX: &str = "REELBOX_";

/// Conventional variable holding the OMDb key, mapped onto `catalog.api_key`.
pub const OMDB_API_KEY_VAR: &str = "OMDB_API_KEY";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(Figment::new())
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&[OMDB_API_KEY_VAR])
                .map(|_| "catalog.api_key".into()),
        )
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
