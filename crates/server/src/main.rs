use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelbox_core::{
    load_config, load_config_from_env, validate_config, Config, FavoritesStore,
    JsonFavoritesStore, MovieCatalog, OmdbClient,
};
use reelbox_server::api::create_router;
use reelbox_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();

    let config = load()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog provider: {}", config.catalog.base_url);

    // Open favorites store
    let favorites_path = config.storage.favorites_path();
    let favorites: Arc<dyn FavoritesStore> = Arc::new(
        JsonFavoritesStore::open(&favorites_path)
            .await
            .with_context(|| format!("Failed to open favorites store at {:?}", favorites_path))?,
    );
    info!(
        "Favorites store opened at {:?} ({} favorites)",
        favorites_path,
        favorites.count().await
    );

    // Create catalog client
    let catalog: Arc<dyn MovieCatalog> =
        Arc::new(OmdbClient::new(&config.catalog).context("Failed to create catalog client")?);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, catalog, favorites));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Install the global subscriber. `REELBOX_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let json = std::env::var("REELBOX_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Load configuration from `REELBOX_CONFIG` (default `config.toml`), or from
/// the environment alone when that file does not exist.
fn load() -> Result<Config> {
    let config_path = std::env::var("REELBOX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))
    } else {
        info!(
            "No config file at {:?}, using environment only",
            config_path
        );
        load_config_from_env().context("Failed to load config from environment")
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
