//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{
    IMPORTS_TOTAL, INVALID_TOKENS_TOTAL, RENDERS_TOTAL, RENDER_LATENCY, STORAGE_OPERATIONS_TOTAL,
    TEMPLATES_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording render metrics
pub struct RenderMetrics;

impl RenderMetrics {
    /// Record a render of a stored template
    pub fn record_stored(invalid_tokens: usize, elapsed: Duration) {
        Self::record("stored", invalid_tokens, elapsed);
    }

    /// Record a render of ad-hoc content
    pub fn record_adhoc(invalid_tokens: usize, elapsed: Duration) {
        Self::record("adhoc", invalid_tokens, elapsed);
    }

    fn record(source: &str, invalid_tokens: usize, elapsed: Duration) {
        RENDERS_TOTAL.with_label_values(&[source]).inc();
        INVALID_TOKENS_TOTAL.inc_by(invalid_tokens as u64);
        RENDER_LATENCY.observe(elapsed.as_secs_f64());
    }
}

/// Helper struct for recording template collection metrics
pub struct TemplateMetrics;

impl TemplateMetrics {
    /// Set the current template count
    pub fn set_count(count: usize) {
        TEMPLATES_TOTAL.set(count as i64);
    }

    /// Record a successful import
    pub fn record_import_ok() {
        IMPORTS_TOTAL.with_label_values(&["ok"]).inc();
    }

    /// Record a rejected import
    pub fn record_import_rejected() {
        IMPORTS_TOTAL.with_label_values(&["rejected"]).inc();
    }
}

/// Helper struct for recording storage metrics
pub struct StorageMetrics;

impl StorageMetrics {
    /// Record a storage operation outcome
    pub fn record(op: &str, ok: bool) {
        let result = if ok { "ok" } else { "error" };
        STORAGE_OPERATIONS_TOTAL
            .with_label_values(&[op, result])
            .inc();
    }
}
