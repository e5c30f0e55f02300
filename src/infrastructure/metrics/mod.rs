//! Prometheus metrics for the template service.
//!
//! - Template counts
//! - Render throughput, latency and malformed tokens seen
//! - Storage writes and import outcomes

mod helpers;

pub use helpers::{encode_metrics, RenderMetrics, StorageMetrics, TemplateMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ttpl";

lazy_static! {
    /// Number of stored templates
    pub static ref TEMPLATES_TOTAL: IntGauge = register_int_gauge!(
        format!("{}_templates_total", METRIC_PREFIX),
        "Number of stored templates"
    ).unwrap();

    /// Renders by source (stored template or ad-hoc content)
    pub static ref RENDERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_renders_total", METRIC_PREFIX),
        "Total template renders",
        &["source"]
    ).unwrap();

    /// Malformed tokens found while rendering
    pub static ref INVALID_TOKENS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_invalid_tokens_total", METRIC_PREFIX),
        "Total malformed tokens found in rendered templates"
    ).unwrap();

    /// Time spent extracting, syncing and rendering
    pub static ref RENDER_LATENCY: Histogram = register_histogram!(
        format!("{}_render_latency_seconds", METRIC_PREFIX),
        "Template render latency in seconds",
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]
    ).unwrap();

    /// Storage operations by operation and result
    pub static ref STORAGE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_storage_operations_total", METRIC_PREFIX),
        "Total storage backend operations",
        &["op", "result"]
    ).unwrap();

    /// Imports by result
    pub static ref IMPORTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_imports_total", METRIC_PREFIX),
        "Total template imports",
        &["result"]
    ).unwrap();
}
