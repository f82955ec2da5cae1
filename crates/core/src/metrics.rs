//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog provider calls (outcome and latency)
//! - Favorites mutations (operation and outcome)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog provider requests total by outcome.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelbox_catalog_requests_total",
            "Total catalog provider requests",
        ),
        &["outcome"], // "success", "no_results", or an error kind name
    )
    .unwrap()
});

/// Catalog provider request duration.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelbox_catalog_request_duration_seconds",
            "Duration of catalog provider calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Favorites Metrics
// =============================================================================

/// Favorites mutations total.
pub static FAVORITES_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelbox_favorites_mutations_total",
            "Total favorites add/remove operations",
        ),
        &["operation", "outcome"], // operation: "add", "remove"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(FAVORITES_MUTATIONS.clone()),
    ]
}

/// Record the outcome of one catalog provider call.
pub fn record_catalog_request(outcome: &str, duration_secs: f64) {
    CATALOG_REQUESTS.with_label_values(&[outcome]).inc();
    CATALOG_REQUEST_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Record a favorites add/remove.
pub fn record_favorites_mutation(operation: &str, outcome: &str) {
    FAVORITES_MUTATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}
