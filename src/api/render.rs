//! Variable inspection, value drafts and rendering endpoints.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::metrics::RenderMetrics;
use crate::server::AppState;
use crate::template::{
    extract_variables, preview, Extraction, ExtractRequest, RenderContentRequest, RenderRequest,
    RenderedTemplate, SetValuesRequest, ValueMap, VariablesResponse,
};

/// GET /api/v1/templates/{id}/variables - Variables and synced draft values
#[tracing::instrument(name = "http.template_variables", skip(state))]
pub async fn template_variables(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VariablesResponse>> {
    let template = state.template_store.get(&id)?;
    Ok(Json(state.sync_draft(&template)))
}

/// PUT /api/v1/templates/{id}/values - Merge values into the draft
#[tracing::instrument(name = "http.set_values", skip(state, request))]
pub async fn set_values(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetValuesRequest>,
) -> Result<Json<ValueMap>> {
    let template = state.template_store.get(&id)?;
    let values = state.drafts.set_values(&template, request.values);
    state.retain_draft(&id);
    Ok(Json(values))
}

/// DELETE /api/v1/templates/{id}/values - Clear the draft
#[tracing::instrument(name = "http.reset_values", skip(state))]
pub async fn reset_values(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ValueMap>> {
    let template = state.template_store.get(&id)?;
    let values = state.drafts.reset(&template);
    state.retain_draft(&id);
    Ok(Json(values))
}

/// POST /api/v1/templates/{id}/render - Render a stored template
#[tracing::instrument(name = "http.render_template", skip(state, request))]
pub async fn render_stored(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Option<Json<RenderRequest>>,
) -> Result<Json<RenderedTemplate>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let template = state.template_store.get(&id)?;
    let style = request
        .placeholder_style
        .unwrap_or_else(|| state.default_placeholder_style());

    let start = Instant::now();
    let rendered = state.drafts.render(&template, request.values, style);
    RenderMetrics::record_stored(rendered.invalid.len(), start.elapsed());

    Ok(Json(rendered))
}

/// POST /api/v1/render - Render ad-hoc content
#[tracing::instrument(name = "http.render_content", skip(state, request))]
pub async fn render_content(
    State(state): State<AppState>,
    Json(request): Json<RenderContentRequest>,
) -> Json<RenderedTemplate> {
    let style = request
        .placeholder_style
        .unwrap_or_else(|| state.default_placeholder_style());

    let start = Instant::now();
    let rendered = preview(&request.content, &request.values, style);
    RenderMetrics::record_adhoc(rendered.invalid.len(), start.elapsed());

    Json(rendered)
}

/// POST /api/v1/extract - Extract variables from ad-hoc content
#[tracing::instrument(name = "http.extract", skip(request))]
pub async fn extract(Json(request): Json<ExtractRequest>) -> Json<Extraction> {
    Json(extract_variables(&request.content))
}
