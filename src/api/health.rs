//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub templates: usize,
    pub storage: StorageHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct StorageHealthResponse {
    pub backend: String,
    pub reachable: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub templates: usize,
    pub drafts: usize,
    pub default_placeholder_style: String,
    pub autosave_debounce_ms: u64,
}

/// Templates are served from memory, so an unreachable backend only degrades
/// persistence.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = match state.repository.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Storage backend ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        templates: state.template_store.count(),
        storage: StorageHealthResponse {
            backend: state.repository.backend_type().to_string(),
            reachable,
        },
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        templates: state.template_store.count(),
        drafts: state.drafts.len(),
        default_placeholder_style: state.default_placeholder_style().as_str().to_string(),
        autosave_debounce_ms: state.settings.autosave.debounce_ms,
    })
}
