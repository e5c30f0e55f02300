//! Template CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, Result};
use crate::metrics::TemplateMetrics;
use crate::server::AppState;
use crate::template::{
    CreateTemplateRequest, ListQuery, TemplateItem, TemplateListResponse, UpdateTemplateRequest,
};

/// POST /api/v1/templates - Create a new template
#[tracing::instrument(name = "http.create_template", skip(state, request))]
pub async fn create_template(
    State(state): State<AppState>,
    request: Option<Json<CreateTemplateRequest>>,
) -> Result<(StatusCode, Json<TemplateItem>)> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let created = state.template_store.create(request)?;

    state.sync_draft(&created);
    state.autosave.save_now();
    TemplateMetrics::set_count(state.template_store.count());

    tracing::info!(template_id = %created.id, "Template created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/templates - List templates, optionally filtered by name (`?q=`)
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<TemplateListResponse> {
    let templates = match query.q.as_deref() {
        Some(q) => state.template_store.search(q),
        None => state.template_store.list(),
    };
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/{id} - Get a specific template
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateItem>> {
    Ok(Json(state.template_store.get(&id)?))
}

/// PATCH /api/v1/templates/{id} - Update name and/or content
#[tracing::instrument(name = "http.update_template", skip(state, request))]
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<TemplateItem>> {
    if request.is_empty() {
        return Err(AppError::Validation(
            "Provide a name and/or content to update".to_string(),
        ));
    }

    let content_changed = request.content.is_some();
    let updated = state.template_store.update(&id, request)?;

    if content_changed {
        let synced = state.sync_draft(&updated);
        tracing::debug!(
            template_id = %id,
            vars = synced.vars.len(),
            invalid = synced.invalid.len(),
            "Drafts resynced after content change"
        );
    }
    state.autosave.schedule();

    Ok(Json(updated))
}

/// DELETE /api/v1/templates/{id} - Delete a template
#[tracing::instrument(name = "http.delete_template", skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.template_store.delete(&id)?;
    state.drafts.remove(&id);
    state.autosave.save_now();
    TemplateMetrics::set_count(state.template_store.count());

    tracing::info!(template_id = %id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/templates/{id}/duplicate - Copy a template
#[tracing::instrument(name = "http.duplicate_template", skip(state))]
pub async fn duplicate_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<TemplateItem>)> {
    let copy = state.template_store.duplicate(&id)?;

    state.sync_draft(&copy);
    state.autosave.save_now();
    TemplateMetrics::set_count(state.template_store.count());

    tracing::info!(source_id = %id, template_id = %copy.id, "Template duplicated");
    Ok((StatusCode::CREATED, Json(copy)))
}
