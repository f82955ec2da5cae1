//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the reelbox server:
//! - HTTP request metrics (latency, counts, errors)
//! - Stored favorites (collected dynamically)
//! - Core metrics (catalog calls, favorites mutations)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use regex_lite::Regex;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelbox_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelbox_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "reelbox_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Service errors returned to clients, by kind.
pub static HTTP_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelbox_http_errors_total", "Error responses by kind"),
        &["kind"],
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics (collected dynamically)
// =============================================================================

/// Favorites currently held in memory.
pub static FAVORITES_STORED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("reelbox_favorites_stored", "Number of stored favorites").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_ERRORS_TOTAL.clone()))
        .unwrap();

    // Favorites
    registry
        .register(Box::new(FAVORITES_STORED.clone()))
        .unwrap();

    // Core metrics (catalog provider, favorites mutations)
    for metric in reelbox_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the favorites gauge reflects the store.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    FAVORITES_STORED.set(state.favorites().count().await as i64);
}

static EXTERNAL_ID_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/tt\d+(/|$)").unwrap());
static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    let result = EXTERNAL_ID_SEGMENT.replace_all(path, "/{id}$1");
    let result = NUMERIC_SEGMENT.replace_all(&result, "/{id}$1");
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_external_id() {
        let path = "/api/v1/favorites/tt1375666";
        assert_eq!(normalize_path(path), "/api/v1/favorites/{id}");
    }

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/v1/favorites/12345";
        assert_eq!(normalize_path(path), "/api/v1/favorites/{id}");
    }

    #[test]
    fn test_normalize_path_no_ids() {
        assert_eq!(normalize_path("/api/v1/health"), "/api/v1/health");
        assert_eq!(normalize_path("/api/v1/search"), "/api/v1/search");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("reelbox_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_all_metrics() {
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        HTTP_ERRORS_TOTAL.with_label_values(&["not_found"]).inc();
        FAVORITES_STORED.set(0);
        reelbox_core::metrics::record_catalog_request("success", 0.1);
        reelbox_core::metrics::record_favorites_mutation("add", "success");

        let output = encode_metrics();

        assert!(output.contains("reelbox_http_request_duration_seconds"));
        assert!(output.contains("reelbox_http_requests_in_flight"));
        assert!(output.contains("reelbox_http_errors_total"));
        assert!(output.contains("reelbox_favorites_stored"));
        assert!(output.contains("reelbox_catalog_requests_total"));
        assert!(output.contains("reelbox_favorites_mutations_total"));
    }
}
