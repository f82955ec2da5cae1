//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key for access. Search results come back in pages
//! of ten; the total count and success flag are both sent as text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{parse_year, CatalogMovie, CatalogPage, ProviderResponse};
use super::{validate_search_args, MovieCatalog};
use crate::config::CatalogConfig;
use crate::error::ServiceError;
use crate::metrics;
use crate::pagination::parse_total_results;

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: &CatalogConfig) -> Result<Self, ServiceError> {
        if config.api_key.trim().is_empty() {
            return Err(ServiceError::invalid_argument("OMDb API key is required"));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    /// Build the search URL. The query is percent-encoded here.
    fn build_search_url(&self, query: &str, page: u32) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}apikey={}&s={}&page={}",
            self.base_url,
            separator,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            page
        )
    }

    async fn fetch(&self, query: &str, page: u32) -> Result<CatalogPage, ServiceError> {
        let url = self.build_search_url(query, page);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection_error(status, &body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::UpstreamError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(e))?;
        let search: OmdbSearchResponse = serde_json::from_str(&body).map_err(|e| {
            ServiceError::internal(format!("Failed to parse OMDb search response: {}", e))
        })?;

        match search.into_provider_response() {
            ProviderResponse::Success { items, total_text } => {
                let total_results = match parse_total_results(total_text.as_deref()) {
                    Some(total) => total,
                    None => {
                        warn!(
                            total = ?total_text,
                            "OMDb returned a non-numeric totalResults, treating as 0"
                        );
                        0
                    }
                };
                Ok(CatalogPage {
                    items,
                    total_results,
                })
            }
            ProviderResponse::NotFound => Ok(CatalogPage::empty()),
            ProviderResponse::Error { message } => {
                if is_api_key_message(&message) {
                    Err(ServiceError::UpstreamAuthFailure(message))
                } else {
                    Err(ServiceError::UpstreamError {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }
    }

    fn classify_transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::UpstreamTimeout(format!(
                "no response from OMDb within {}s",
                self.timeout.as_secs()
            ))
        } else if e.is_connect() {
            ServiceError::UpstreamUnavailable {
                message: format!("cannot reach OMDb at {}", self.base_url),
                source: Some(e),
            }
        } else {
            ServiceError::internal(format!("OMDb request failed: {}", e))
        }
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage, ServiceError> {
        let query = validate_search_args(query, page)?;

        debug!(query = query, page = page, "OMDb search");

        let start = Instant::now();
        let result = self.fetch(query, page).await;
        let outcome = match &result {
            Ok(p) if p.items.is_empty() => "no_results",
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        metrics::record_catalog_request(outcome, start.elapsed().as_secs_f64());

        if let Ok(p) = &result {
            debug!(
                query = query,
                page = page,
                results = p.items.len(),
                total = p.total_results,
                "OMDb search complete"
            );
        }

        result
    }
}

/// OMDb reports key problems as text, e.g. "Invalid API key!" or "No API key provided."
fn is_api_key_message(message: &str) -> bool {
    message.to_lowercase().contains("api key")
}

/// Classify a 401/403. OMDb also answers quota exhaustion with 401, so only
/// key complaints (or a body without a message) count as auth failures.
fn rejection_error(status: StatusCode, body: &str) -> ServiceError {
    let message = serde_json::from_str::<OmdbSearchResponse>(body)
        .ok()
        .and_then(|r| r.error);

    match message {
        Some(message) if !is_api_key_message(&message) => ServiceError::UpstreamError {
            status: status.as_u16(),
            message,
        },
        Some(message) => ServiceError::UpstreamAuthFailure(message),
        None => ServiceError::UpstreamAuthFailure("OMDb rejected the API key".to_string()),
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default = "not_available")]
    poster: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

impl OmdbSearchResponse {
    /// Classify the loosely-typed response.
    ///
    /// `Response` is the text `"True"`/`"False"`. A `"False"` without a key
    /// or quota complaint is the "no results" sentinel (`Movie not found!`,
    /// `Too many results.`).
    fn into_provider_response(self) -> ProviderResponse {
        if self.response.eq_ignore_ascii_case("true") {
            return ProviderResponse::Success {
                items: self.search.into_iter().map(Into::into).collect(),
                total_text: self.total_results,
            };
        }

        match self.error {
            Some(message) if is_provider_error(&message) => ProviderResponse::Error { message },
            _ => ProviderResponse::NotFound,
        }
    }
}

fn is_provider_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("api key") || lower.contains("limit")
}

impl From<OmdbSearchItem> for CatalogMovie {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            title: item.title,
            external_id: item.imdb_id,
            year: parse_year(&item.year),
            poster_url: item.poster,
        }
    }
}
