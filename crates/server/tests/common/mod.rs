//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock catalog and a temp-dir favorites store, so the whole HTTP
//! surface can be exercised without network access.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use reelbox_core::{
    testing::MockMovieCatalog, CatalogConfig, Config, FavoritesConfig, FavoritesStore,
    JsonFavoritesStore, MovieCatalog, StorageConfig,
};
use reelbox_server::state::AppState;

/// Re-export fixtures for test convenience
pub use reelbox_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_add_favorite() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/favorites", json!({
///         "title": "Inception",
///         "externalId": "tt1375666",
///         "year": 2010,
///         "posterUrl": "N/A"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure search results and failures
    pub catalog: Arc<MockMovieCatalog>,
    /// Temporary directory holding the favorites file
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_favorites_config(FavoritesConfig::default()).await
    }

    /// Create a test fixture with custom favorites paging limits.
    pub async fn with_favorites_config(favorites: FavoritesConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config {
            server: Default::default(),
            storage: StorageConfig {
                data_dir: temp_dir.path().join("data"),
                file_name: "favorites.json".to_string(),
            },
            catalog: CatalogConfig {
                api_key: "super-secret-key".to_string(),
                ..Default::default()
            },
            favorites,
        };

        let catalog = Arc::new(MockMovieCatalog::new());
        let store = JsonFavoritesStore::open(config.storage.favorites_path())
            .await
            .expect("Failed to open favorites store");

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&catalog) as Arc<dyn MovieCatalog>,
            Arc::new(store) as Arc<dyn FavoritesStore>,
        ));

        let router = reelbox_server::api::create_router(state);

        Self {
            router,
            catalog,
            temp_dir,
        }
    }

    /// Path of the favorites file backing this fixture.
    pub fn favorites_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("favorites.json")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
