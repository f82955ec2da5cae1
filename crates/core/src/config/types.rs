use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Where the favorites file lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the favorites file, created on first run.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl StorageConfig {
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_name() -> String {
    "favorites.json".to_string()
}

/// OMDb catalog provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// OMDb API key. Required; startup fails without it.
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Number of results the provider returns per page (default: 10)
    #[serde(default = "default_catalog_page_size")]
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            page_size: default_catalog_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_catalog_page_size() -> u32 {
    10
}

/// Favorites listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FavoritesConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: SanitizedCatalogConfig,
    pub favorites: FavoritesConfig,
}

/// Sanitized catalog config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            storage: config.storage.clone(),
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                api_key_configured: !config.catalog.api_key.trim().is_empty(),
                timeout_secs: config.catalog.timeout_secs,
                page_size: config.catalog.page_size,
            },
            favorites: config.favorites.clone(),
        }
    }
}
